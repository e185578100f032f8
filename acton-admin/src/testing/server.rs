//! Test server around `axum-test`

use axum::Router;

/// In-process server for admin routers
pub struct TestServer {
    inner: axum_test::TestServer,
}

impl TestServer {
    /// Serve a finished router
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be started
    pub fn new(app: Router) -> anyhow::Result<Self> {
        let inner = axum_test::TestServer::new(app)?;
        Ok(Self { inner })
    }

    /// GET request
    pub fn get(&self, path: &str) -> axum_test::TestRequest {
        self.inner.get(path)
    }

    /// POST request
    pub fn post(&self, path: &str) -> axum_test::TestRequest {
        self.inner.post(path)
    }

    /// DELETE request
    pub fn delete(&self, path: &str) -> axum_test::TestRequest {
        self.inner.delete(path)
    }

    /// The wrapped `axum_test::TestServer`
    #[must_use]
    pub const fn inner(&self) -> &axum_test::TestServer {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::{delete, get, post};

    #[tokio::test]
    async fn test_http_methods() {
        let app = Router::new()
            .route("/", get(|| async { "GET" }))
            .route("/post", post(|| async { "POST" }))
            .route("/delete", delete(|| async { "DELETE" }));

        let server = TestServer::new(app).unwrap();

        assert_eq!(server.get("/").await.text(), "GET");
        assert_eq!(server.post("/post").await.text(), "POST");
        assert_eq!(server.delete("/delete").await.text(), "DELETE");
    }
}
