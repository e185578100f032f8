//! Assembling the admin panel
//!
//! Models, pages, controllers, templates and middleware are all registered
//! on an [`AdminBuilder`]. Registration callbacks receive a
//! [`BootstrapContext`] and run in a fixed order when the builder is built:
//! every `bootstrap` callback first, then every `register` callback, each
//! group in the order it was added.
//!
//! ```rust
//! use acton_admin::bootstrap::AdminBuilder;
//! use acton_admin::config::AdminConfig;
//! use acton_admin::model::ModelConfiguration;
//! use acton_admin::navigation::Page;
//!
//! # fn main() -> Result<(), acton_admin::error::AdminError> {
//! let admin = AdminBuilder::new(AdminConfig::default())
//!     .bootstrap(|ctx| {
//!         ctx.page(Page::new("Reports", "/reports").priority(10));
//!     })
//!     .register(|ctx| {
//!         ctx.model(ModelConfiguration::new("blog::Post"));
//!     })
//!     .build()?;
//!
//! assert_eq!(admin.state().router().aliases().resolve("posts"), Some("blog::Post"));
//! let app: axum::Router = admin.router();
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::AdminConfig;
use crate::controller::{Controller, ControllerRegistry};
use crate::error::AdminError;
use crate::model::{ModelConfiguration, ModelConfigurationManager};
use crate::navigation::{Navigation, Page};
use crate::routing::{routes::admin_routes, AliasMap, AliasRouter};
use crate::state::AdminState;
use crate::template::{Template, TemplateRegistry};

/// Wraps the finished admin router in a layer
pub type MiddlewareFactory = Arc<dyn Fn(Router) -> Router + Send + Sync>;

type Callback = Box<dyn FnOnce(&mut BootstrapContext<'_>) + Send>;
type RoutesCallback = Box<dyn FnOnce(Router<AdminState>) -> Router<AdminState> + Send>;

/// Handed to registration callbacks
pub struct BootstrapContext<'a> {
    config: &'a AdminConfig,
    models: Vec<ModelConfiguration>,
    pages: Vec<Page>,
}

impl BootstrapContext<'_> {
    /// Loaded configuration
    #[must_use]
    pub const fn config(&self) -> &AdminConfig {
        self.config
    }

    /// Register a model
    pub fn model(&mut self, model: ModelConfiguration) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Add a navigation page
    pub fn page(&mut self, page: Page) -> &mut Self {
        self.pages.push(page);
        self
    }

    /// Models registered so far
    #[must_use]
    pub fn models(&self) -> &[ModelConfiguration] {
        &self.models
    }
}

/// Collects registrations and builds an [`Admin`]
pub struct AdminBuilder {
    config: AdminConfig,
    templates: TemplateRegistry,
    controllers: ControllerRegistry,
    bootstrappers: Vec<Callback>,
    registrars: Vec<Callback>,
    models: Vec<ModelConfiguration>,
    routes: Vec<RoutesCallback>,
    middleware: HashMap<String, MiddlewareFactory>,
}

impl fmt::Debug for AdminBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminBuilder")
            .field("config", &self.config)
            .field("templates", &self.templates)
            .field("controllers", &self.controllers)
            .field("models", &self.models.len())
            .finish_non_exhaustive()
    }
}

impl AdminBuilder {
    /// Builder with the `default` template, `AdminController` and the
    /// `trace` middleware registered
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let mut builder = Self {
            config,
            templates: TemplateRegistry::new(),
            controllers: ControllerRegistry::new(),
            bootstrappers: Vec::new(),
            registrars: Vec::new(),
            models: Vec::new(),
            routes: Vec::new(),
            middleware: HashMap::new(),
        };
        builder = builder.middleware("trace", |router| router.layer(TraceLayer::new_for_http()));
        builder
    }

    /// Register a template selectable through `config.template`
    #[must_use]
    pub fn template<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&AdminConfig) -> Result<Arc<dyn Template>, AdminError> + Send + Sync + 'static,
    {
        self.templates.register(name, factory);
        self
    }

    /// Register a controller models can name
    #[must_use]
    pub fn controller(mut self, name: impl Into<String>, controller: impl Controller + 'static) -> Self {
        self.controllers.register(name, controller);
        self
    }

    /// Add a callback run before every `register` callback
    #[must_use]
    pub fn bootstrap<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut BootstrapContext<'_>) + Send + 'static,
    {
        self.bootstrappers.push(Box::new(callback));
        self
    }

    /// Add a registration callback
    #[must_use]
    pub fn register<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut BootstrapContext<'_>) + Send + 'static,
    {
        self.registrars.push(Box::new(callback));
        self
    }

    /// Register a model directly
    #[must_use]
    pub fn model(mut self, model: ModelConfiguration) -> Self {
        self.models.push(model);
        self
    }

    /// Add routes next to the admin routes, under the same prefix and state
    #[must_use]
    pub fn routes<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Router<AdminState>) -> Router<AdminState> + Send + 'static,
    {
        self.routes.push(Box::new(callback));
        self
    }

    /// Register middleware selectable through `config.middleware`
    #[must_use]
    pub fn middleware<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Router) -> Router + Send + Sync + 'static,
    {
        self.middleware.insert(name.into(), Arc::new(factory));
        self
    }

    /// Resolve the template, run the callbacks and wire every model
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Template`] if the configured template is not
    /// registered, and [`AdminError::Config`] for invalid or duplicate
    /// aliases, duplicate models, unregistered controllers or unknown
    /// middleware names.
    pub fn build(self) -> Result<Admin, AdminError> {
        let Self {
            config,
            templates,
            controllers,
            bootstrappers,
            registrars,
            models,
            routes,
            middleware,
        } = self;

        let template = templates.resolve(&config)?;
        tracing::info!(template = template.name(), "Admin template resolved");

        let (models, pages) = {
            let mut ctx = BootstrapContext {
                config: &config,
                models,
                pages: Vec::new(),
            };
            for callback in bootstrappers.into_iter().chain(registrars) {
                callback(&mut ctx);
            }
            (ctx.models, ctx.pages)
        };

        let prefix = config.route_prefix();
        let mut aliases = AliasMap::new();
        let mut manager = ModelConfigurationManager::new();
        let mut navigation = Navigation::new();

        for mut model in models {
            if let Some(alias) = config.aliases.get(model.class()) {
                model.apply_alias_override(alias);
            }

            if let Some(controller) = model.controller_name() {
                if !controllers.contains(controller) {
                    return Err(AdminError::Config(format!(
                        "Controller [{controller}] of [{}] is not registered",
                        model.class()
                    )));
                }
            }

            aliases.insert(model.alias(), model.class())?;
            navigation.add(Page::new(model.title_text(), model.links(&prefix).display_url()));
            manager.register(model)?;
        }

        for page in pages {
            navigation.add(page);
        }

        let layers = config
            .middleware
            .iter()
            .map(|name| {
                middleware.get(name).cloned().ok_or_else(|| {
                    AdminError::Config(format!("Middleware [{name}] is not registered"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let routes = routes.into_iter().fold(admin_routes(), |router, callback| callback(router));

        tracing::info!(
            prefix = %prefix,
            models = manager.len(),
            aliases = %aliases.pattern(),
            "Admin panel built"
        );

        let router = AliasRouter::new(aliases, Arc::new(manager));
        let state = AdminState::new(config, router, controllers, template, navigation);

        Ok(Admin {
            state,
            routes,
            layers,
        })
    }
}

/// A built admin panel
pub struct Admin {
    state: AdminState,
    routes: Router<AdminState>,
    layers: Vec<MiddlewareFactory>,
}

impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("state", &self.state)
            .field("layers", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl Admin {
    /// Shared state handed to handlers
    #[must_use]
    pub const fn state(&self) -> &AdminState {
        &self.state
    }

    /// The admin routes mounted under the prefix, with middleware applied in
    /// configuration order
    #[must_use]
    pub fn router(self) -> Router {
        let prefix = self.state.prefix().to_string();
        let mounted = if prefix.is_empty() {
            Router::new().merge(self.routes)
        } else {
            Router::new().nest(&prefix, self.routes)
        };

        self.layers
            .iter()
            .fold(mounted.with_state(self.state), |router, layer| layer(router))
    }
}
