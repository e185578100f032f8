//! The model configuration registry

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::configuration::ModelConfiguration;
use super::events::{EventDispatcher, LifecycleEvent, ModelEvent};
use crate::error::AdminError;

/// Registered models, in registration order, plus their event wiring
///
/// Filled during boot and read-only once the admin is built.
#[derive(Debug, Default)]
pub struct ModelConfigurationManager {
    models: Vec<Arc<ModelConfiguration>>,
    index: HashMap<String, usize>,
    dispatcher: EventDispatcher,
}

impl ModelConfigurationManager {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model and wire its lifecycle listeners
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Config`] if the class is already registered.
    pub fn register(&mut self, mut model: ModelConfiguration) -> Result<(), AdminError> {
        if self.index.contains_key(model.class()) {
            return Err(AdminError::Config(format!(
                "Model [{}] is registered twice",
                model.class()
            )));
        }

        for (event, listener) in model.take_listeners() {
            self.dispatcher.listen(event.key(model.class()), listener);
        }

        tracing::debug!(class = model.class(), alias = model.alias(), "Model registered");
        self.index.insert(model.class().to_string(), self.models.len());
        self.models.push(Arc::new(model));
        Ok(())
    }

    /// Configuration of `class`
    #[must_use]
    pub fn get(&self, class: &str) -> Option<&Arc<ModelConfiguration>> {
        self.index.get(class).map(|&i| &self.models[i])
    }

    /// Configuration of `class`
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ModelNotFound`] if it was never registered.
    pub fn require(&self, class: &str) -> Result<&Arc<ModelConfiguration>, AdminError> {
        self.get(class)
            .ok_or_else(|| AdminError::ModelNotFound(class.to_string()))
    }

    /// Registered models in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ModelConfiguration>> {
        self.models.iter()
    }

    /// Number of registered models
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Listener registry
    #[must_use]
    pub const fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Fire `event` for a record of `class`
    ///
    /// Returns `false` if `halt` is set and a listener vetoed.
    pub fn fire(&self, class: &str, event: LifecycleEvent, payload: Value, halt: bool) -> bool {
        let model_event = ModelEvent {
            event,
            class: class.to_string(),
            payload,
        };

        let passed = self
            .dispatcher
            .dispatch(&event.key(class), &model_event, halt);
        if !passed {
            tracing::warn!(class, event = %event, "Lifecycle event halted");
        }
        passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_keeps_order() {
        let mut manager = ModelConfigurationManager::new();
        manager.register(ModelConfiguration::new("blog::Post")).unwrap();
        manager.register(ModelConfiguration::new("blog::Tag")).unwrap();

        let aliases = manager.iter().map(|m| m.alias().to_string()).collect::<Vec<_>>();
        assert_eq!(aliases, vec!["posts", "tags"]);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_duplicate_class_is_rejected() {
        let mut manager = ModelConfigurationManager::new();
        manager.register(ModelConfiguration::new("blog::Post")).unwrap();
        let err = manager
            .register(ModelConfiguration::new("blog::Post").with_alias("articles"))
            .unwrap_err();
        assert!(matches!(err, AdminError::Config(_)));
    }

    #[test]
    fn test_require_unknown_model() {
        let manager = ModelConfigurationManager::new();
        assert!(matches!(
            manager.require("blog::Post"),
            Err(AdminError::ModelNotFound(_))
        ));
    }

    #[test]
    fn test_fire_reaches_wired_listeners() {
        let mut manager = ModelConfigurationManager::new();
        manager
            .register(
                ModelConfiguration::new("blog::Post")
                    .creating(|event| event.payload["title"] != "spam"),
            )
            .unwrap();

        assert!(manager
            .dispatcher()
            .has_listeners("acton_admin.creating: blog::Post"));
        assert!(manager.fire("blog::Post", LifecycleEvent::Creating, json!({ "title": "ok" }), true));
        assert!(!manager.fire("blog::Post", LifecycleEvent::Creating, json!({ "title": "spam" }), true));
        assert!(manager.fire("blog::Post", LifecycleEvent::Deleted, Value::Null, true));
    }

    #[test]
    fn test_listeners_are_scoped_by_class() {
        let mut manager = ModelConfigurationManager::new();
        manager
            .register(ModelConfiguration::new("blog::Post").deleting(|_| false))
            .unwrap();
        manager.register(ModelConfiguration::new("blog::Tag")).unwrap();

        assert!(!manager.fire("blog::Post", LifecycleEvent::Deleting, Value::Null, true));
        assert!(manager.fire("blog::Tag", LifecycleEvent::Deleting, Value::Null, true));
    }
}
