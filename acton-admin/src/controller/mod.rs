//! Controllers
//!
//! Admin routes dispatch to a [`Controller`] by name. Every route is declared
//! against [`AdminController`]; a model naming its own controller gets that
//! controller instead, with the same action. A custom controller usually
//! handles a few actions and hands the rest back to [`AdminController`]:
//!
//! ```rust
//! use acton_admin::controller::{actions, AdminController, AdminRequest, Controller};
//! use acton_admin::error::AdminError;
//! use async_trait::async_trait;
//! use axum::response::{IntoResponse, Response};
//!
//! struct PostController;
//!
//! #[async_trait]
//! impl Controller for PostController {
//!     async fn call(&self, action: &str, request: AdminRequest) -> Result<Response, AdminError> {
//!         match action {
//!             actions::POST_DELETE => Err(AdminError::ActionNotAllowed("posts are archived".into())),
//!             _ => AdminController.call(action, request).await,
//!         }
//!     }
//! }
//! ```

mod admin;

pub use admin::{actions, AdminController};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::{IntoResponse, Redirect, Response};
use axum_htmx::HxRedirect;

use crate::display::RenderContext;
use crate::error::AdminError;
use crate::model::ModelConfiguration;
use crate::routing::ModelLinks;
use crate::state::AdminState;

/// A request routed to a model
#[derive(Debug, Clone)]
pub struct AdminRequest {
    /// Admin state
    pub state: AdminState,
    /// Addressed model
    pub model: Arc<ModelConfiguration>,
    /// Record key from the route, if the route has one
    pub id: Option<String>,
    /// Submitted form fields
    pub input: HashMap<String, String>,
    /// Whether only the fragment should be returned
    pub partial: bool,
}

impl AdminRequest {
    /// URLs of the addressed model
    #[must_use]
    pub fn links(&self) -> ModelLinks {
        self.model.links(self.state.prefix())
    }

    /// Render context for the addressed model
    #[must_use]
    pub fn render_context<'a>(&'a self, links: &'a ModelLinks) -> RenderContext<'a> {
        RenderContext::new(self.state.template())
            .with_links(links)
            .with_key_name(self.model.key())
            .with_image_width(&self.state.config().display.image_width)
    }

    /// Record key from the route
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::BadRequest`] on routes without a key.
    pub fn require_id(&self) -> Result<&str, AdminError> {
        self.id
            .as_deref()
            .ok_or_else(|| AdminError::BadRequest("missing record key".to_string()))
    }

    /// Wrap a fragment in the layout unless the request is partial
    ///
    /// # Errors
    ///
    /// Returns whatever the template reports while rendering the layout.
    pub fn page(&self, content: String) -> Result<Response, AdminError> {
        self.state.render_page(
            &self.model.title_text(),
            content,
            &self.links().display_url(),
            self.partial,
        )
    }

    /// Redirect, through `HX-Redirect` for htmx requests
    #[must_use]
    pub fn redirect(&self, url: &str) -> Response {
        if self.partial {
            (HxRedirect::from(url), ()).into_response()
        } else {
            Redirect::to(url).into_response()
        }
    }
}

/// Handles the actions of admin routes
#[async_trait]
pub trait Controller: Send + Sync {
    /// Run `action` for `request`
    ///
    /// # Errors
    ///
    /// Implementations return [`AdminError::ActionNotFound`] for actions
    /// they do not know.
    async fn call(&self, action: &str, request: AdminRequest) -> Result<Response, AdminError>;
}

/// Controllers by name
///
/// [`AdminController`] is always registered.
#[derive(Clone)]
pub struct ControllerRegistry {
    controllers: HashMap<String, Arc<dyn Controller>>,
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.controllers.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_list().entries(names).finish()
    }
}

impl ControllerRegistry {
    /// Registry holding [`AdminController`]
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            controllers: HashMap::new(),
        };
        registry.register(AdminController::NAME, AdminController);
        registry
    }

    /// Register a controller, replacing any previous one of that name
    pub fn register(
        &mut self,
        name: impl Into<String>,
        controller: impl Controller + 'static,
    ) -> &mut Self {
        self.controllers.insert(name.into(), Arc::new(controller));
        self
    }

    /// Whether `name` is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.controllers.contains_key(name)
    }

    /// Controller registered as `name`
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ControllerNotFound`] if nothing is registered.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Controller>, AdminError> {
        self.controllers
            .get(name)
            .cloned()
            .ok_or_else(|| AdminError::ControllerNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Controller for Echo {
        async fn call(&self, action: &str, _request: AdminRequest) -> Result<Response, AdminError> {
            Ok(action.to_string().into_response())
        }
    }

    #[test]
    fn test_admin_controller_always_registered() {
        let registry = ControllerRegistry::new();
        assert!(registry.contains("AdminController"));
        assert!(registry.get("AdminController").is_ok());
    }

    #[test]
    fn test_unknown_controller() {
        let registry = ControllerRegistry::new();
        assert!(matches!(
            registry.get("PostController"),
            Err(AdminError::ControllerNotFound(_))
        ));
    }

    #[test]
    fn test_register_custom_controller() {
        let mut registry = ControllerRegistry::new();
        registry.register("EchoController", Echo);
        assert!(registry.contains("EchoController"));
        assert_eq!(format!("{registry:?}"), r#"["AdminController", "EchoController"]"#);
    }
}
