//! Test helpers for the admin router
//!
//! - [`TestServer`] wraps `axum-test` around a built admin router
//! - assertion helpers for redirects and htmx response headers
//!
//! # Example
//!
//! ```rust,ignore
//! use acton_admin::testing::{assert_redirect, TestServer};
//!
//! let server = TestServer::new(admin.router())?;
//! let response = server.post("/admin/posts/create").form(&[("title", "Hello")]).await;
//! assert_redirect(&response, "/admin/posts");
//! ```

pub mod assertions;
pub mod server;

pub use assertions::*;
pub use server::TestServer;
