//! Application state shared by admin handlers
//!
//! Built once by [`AdminBuilder::build`](crate::bootstrap::AdminBuilder::build)
//! and read-only afterwards. Cloning is cheap.

use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

use crate::config::AdminConfig;
use crate::controller::ControllerRegistry;
use crate::error::AdminError;
use crate::model::ModelConfigurationManager;
use crate::navigation::Navigation;
use crate::routing::AliasRouter;
use crate::template::Template;

struct AdminStateInner {
    config: AdminConfig,
    prefix: String,
    router: AliasRouter,
    controllers: ControllerRegistry,
    template: Arc<dyn Template>,
    navigation: Navigation,
}

/// State handed to every admin handler and controller
///
/// # Example
///
/// ```rust
/// use acton_admin::bootstrap::AdminBuilder;
/// use acton_admin::config::AdminConfig;
///
/// # fn example() -> Result<(), acton_admin::error::AdminError> {
/// let admin = AdminBuilder::new(AdminConfig::default()).build()?;
/// let state = admin.state().clone();
///
/// assert_eq!(state.prefix(), "/admin");
/// assert!(state.models().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AdminState {
    inner: Arc<AdminStateInner>,
}

impl AdminState {
    pub(crate) fn new(
        config: AdminConfig,
        router: AliasRouter,
        controllers: ControllerRegistry,
        template: Arc<dyn Template>,
        navigation: Navigation,
    ) -> Self {
        let prefix = config.route_prefix();
        Self {
            inner: Arc::new(AdminStateInner {
                config,
                prefix,
                router,
                controllers,
                template,
                navigation,
            }),
        }
    }

    /// Loaded configuration
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Normalised route prefix (`/admin`, or `""` at the root)
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// Alias router
    #[must_use]
    pub fn router(&self) -> &AliasRouter {
        &self.inner.router
    }

    /// Model registry
    #[must_use]
    pub fn models(&self) -> &ModelConfigurationManager {
        self.inner.router.models()
    }

    /// Controller registry
    #[must_use]
    pub fn controllers(&self) -> &ControllerRegistry {
        &self.inner.controllers
    }

    /// Active template
    #[must_use]
    pub fn template(&self) -> &dyn Template {
        self.inner.template.as_ref()
    }

    /// Navigation menu
    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.inner.navigation
    }

    /// URL of the dashboard
    #[must_use]
    pub fn home_url(&self) -> String {
        if self.prefix().is_empty() {
            "/".to_string()
        } else {
            self.prefix().to_string()
        }
    }

    /// Wrap a fragment in the layout, or return it bare for partial requests
    ///
    /// # Errors
    ///
    /// Returns whatever the template reports while rendering the layout.
    pub fn render_page(
        &self,
        title: &str,
        content: String,
        current_url: &str,
        partial: bool,
    ) -> Result<Response, AdminError> {
        if partial {
            return Ok(Html(content).into_response());
        }

        let html = self.template().render(
            "layout",
            json!({
                "title": title,
                "home_url": self.home_url(),
                "navigation": self.navigation().pages(),
                "current_url": current_url,
                "content": content,
            }),
        )?;

        Ok(Html(html).into_response())
    }
}

impl std::fmt::Debug for AdminState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminState")
            .field("prefix", &self.inner.prefix)
            .field("template", &self.inner.template.name())
            .field("aliases", &self.inner.router.pattern())
            .field("controllers", &self.inner.controllers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelConfigurationManager;
    use crate::navigation::Page;
    use crate::routing::AliasMap;
    use crate::template::MockTemplate;
    use axum::body::to_bytes;

    fn state(config: AdminConfig, template: MockTemplate) -> AdminState {
        let router = AliasRouter::new(AliasMap::new(), Arc::new(ModelConfigurationManager::new()));
        let navigation = [Page::new("Posts", "/admin/posts")].into_iter().collect();
        AdminState::new(
            config,
            router,
            ControllerRegistry::new(),
            Arc::new(template),
            navigation,
        )
    }

    #[test]
    fn test_clone_shares_inner() {
        let state = state(AdminConfig::default(), MockTemplate::new());
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.inner, &cloned.inner));
    }

    #[test]
    fn test_home_url_at_root() {
        let config = AdminConfig {
            url_prefix: String::new(),
            ..AdminConfig::default()
        };
        assert_eq!(state(config, MockTemplate::new()).home_url(), "/");
        assert_eq!(
            state(AdminConfig::default(), MockTemplate::new()).home_url(),
            "/admin"
        );
    }

    #[tokio::test]
    async fn test_partial_page_skips_layout() {
        let state = state(AdminConfig::default(), MockTemplate::new());
        let response = state
            .render_page("Posts", "<table/>".to_string(), "/admin/posts", true)
            .unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<table/>");
    }

    #[tokio::test]
    async fn test_full_page_uses_layout() {
        let mut template = MockTemplate::new();
        template
            .expect_render()
            .withf(|view, context| {
                view == "layout"
                    && context["content"] == "<table/>"
                    && context["navigation"][0]["url"] == "/admin/posts"
                    && context["home_url"] == "/admin"
            })
            .times(1)
            .returning(|_, context| Ok(format!("<html>{}</html>", context["content"].as_str().unwrap_or_default())));

        let state = state(AdminConfig::default(), template);
        let response = state
            .render_page("Posts", "<table/>".to_string(), "/admin/posts", false)
            .unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<html><table/></html>");
    }
}
