//! Binding the model segment of a route
//!
//! Every admin route names the `AdminController@action` it would dispatch
//! to. [`AliasRouter::bind`] turns the alias segment into the model's
//! configuration and, when the model declares its own controller, swaps the
//! controller while keeping the action:
//!
//! ```rust
//! use acton_admin::model::{ModelConfiguration, ModelConfigurationManager};
//! use acton_admin::routing::{AliasMap, AliasRouter};
//! use std::sync::Arc;
//!
//! let mut models = ModelConfigurationManager::new();
//! models
//!     .register(ModelConfiguration::new("blog::Post").controller("PostController"))
//!     .unwrap();
//! let aliases = AliasMap::from_pairs([("posts", "blog::Post")]).unwrap();
//! let router = AliasRouter::new(aliases, Arc::new(models));
//!
//! let bound = router.bind("posts", "AdminController@index").unwrap();
//! assert_eq!(bound.target.to_string(), "PostController@index");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::alias::AliasMap;
use crate::error::AdminError;
use crate::model::{ModelConfiguration, ModelConfigurationManager};

/// A `Controller@action` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DispatchTarget {
    controller: String,
    action: String,
}

impl DispatchTarget {
    /// Target from its parts
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }

    /// Parse `Controller@action`
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRouteAction`] unless the string holds
    /// exactly one `@` with text on both sides.
    pub fn parse(route_action: &str) -> Result<Self, AdminError> {
        match route_action.split_once('@') {
            Some((controller, action))
                if !controller.is_empty() && !action.is_empty() && !action.contains('@') =>
            {
                Ok(Self::new(controller, action))
            }
            _ => Err(AdminError::InvalidRouteAction(route_action.to_string())),
        }
    }

    /// Same action on another controller
    #[must_use]
    pub fn with_controller(self, controller: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: self.action,
        }
    }

    /// Controller name
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Action name
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }
}

impl FromStr for DispatchTarget {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DispatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.controller, self.action)
    }
}

/// Result of binding a route's model segment
#[derive(Debug, Clone)]
pub struct BoundModel {
    /// Configuration of the addressed model
    pub model: Arc<ModelConfiguration>,
    /// Where the request is dispatched
    pub target: DispatchTarget,
}

/// Resolves alias segments against the alias map and the model registry
#[derive(Debug, Clone)]
pub struct AliasRouter {
    aliases: Arc<AliasMap>,
    models: Arc<ModelConfigurationManager>,
}

impl AliasRouter {
    /// Router over a finished alias map and registry
    #[must_use]
    pub fn new(aliases: AliasMap, models: Arc<ModelConfigurationManager>) -> Self {
        Self {
            aliases: Arc::new(aliases),
            models,
        }
    }

    /// The alias map
    #[must_use]
    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// The model registry
    #[must_use]
    pub fn models(&self) -> &ModelConfigurationManager {
        &self.models
    }

    /// Alternation the alias segment is constrained to
    #[must_use]
    pub fn pattern(&self) -> String {
        self.aliases.pattern()
    }

    /// Resolve `segment` to its model configuration
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ModelNotFound`] if the segment is not a
    /// registered alias or its class has no configuration.
    pub fn resolve(&self, segment: &str) -> Result<Arc<ModelConfiguration>, AdminError> {
        if !self.aliases.matches(segment) {
            return Err(AdminError::ModelNotFound(segment.to_string()));
        }

        let class = self
            .aliases
            .resolve(segment)
            .ok_or_else(|| AdminError::ModelNotFound(segment.to_string()))?;

        self.models.require(class).cloned()
    }

    /// Resolve `segment` and decide which controller handles `route_action`
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ModelNotFound`] for unknown aliases and
    /// [`AdminError::InvalidRouteAction`] if `route_action` is not
    /// `Controller@action`.
    pub fn bind(&self, segment: &str, route_action: &str) -> Result<BoundModel, AdminError> {
        let model = self.resolve(segment)?;
        let mut target = DispatchTarget::parse(route_action)?;

        if let Some(controller) = model.controller_name() {
            tracing::debug!(
                alias = segment,
                from = %target,
                to = controller,
                "Controller overridden by model"
            );
            target = target.with_controller(controller);
        }

        Ok(BoundModel { model, target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> AliasRouter {
        let mut models = ModelConfigurationManager::new();
        models.register(ModelConfiguration::new("blog::Post")).unwrap();
        models
            .register(ModelConfiguration::new("blog::Tag").controller("TagController"))
            .unwrap();
        let aliases = AliasMap::from_pairs([("posts", "blog::Post"), ("tags", "blog::Tag")]).unwrap();
        AliasRouter::new(aliases, Arc::new(models))
    }

    #[test]
    fn test_parse_dispatch_target() {
        let target = DispatchTarget::parse("AdminController@getDisplay").unwrap();
        assert_eq!(target.controller(), "AdminController");
        assert_eq!(target.action(), "getDisplay");
        assert_eq!(target.to_string(), "AdminController@getDisplay");
    }

    #[test]
    fn test_parse_rejects_malformed_actions() {
        for malformed in ["index", "@index", "AdminController@", "a@b@c", ""] {
            assert!(
                matches!(
                    DispatchTarget::parse(malformed),
                    Err(AdminError::InvalidRouteAction(_))
                ),
                "{malformed} should be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_registered_alias() {
        let model = router().resolve("posts").unwrap();
        assert_eq!(model.class(), "blog::Post");
    }

    #[test]
    fn test_resolve_unknown_alias() {
        assert!(matches!(
            router().resolve("unknown-alias"),
            Err(AdminError::ModelNotFound(_))
        ));
    }

    #[test]
    fn test_bind_keeps_default_controller() {
        let bound = router().bind("posts", "AdminController@getDisplay").unwrap();
        assert_eq!(bound.target, DispatchTarget::new("AdminController", "getDisplay"));
    }

    #[test]
    fn test_bind_overrides_controller_and_keeps_action() {
        let bound = router().bind("tags", "AdminController@index").unwrap();
        assert_eq!(bound.target.to_string(), "TagController@index");
        assert_eq!(bound.model.class(), "blog::Tag");
    }

    #[test]
    fn test_alias_without_configuration_is_not_found() {
        let aliases = AliasMap::from_pairs([("ghosts", "blog::Ghost")]).unwrap();
        let router = AliasRouter::new(aliases, Arc::new(ModelConfigurationManager::new()));
        assert!(matches!(
            router.bind("ghosts", "AdminController@getDisplay"),
            Err(AdminError::ModelNotFound(_))
        ));
    }
}
