//! Named template factories
//!
//! The configuration names a template; the registry turns that name into a
//! live [`Template`] once, at boot.

use std::collections::HashMap;
use std::sync::Arc;

use super::{DefaultTemplate, Template};
use crate::config::AdminConfig;
use crate::error::AdminError;

/// Builds a template from the loaded configuration
pub type TemplateFactory =
    Arc<dyn Fn(&AdminConfig) -> Result<Arc<dyn Template>, AdminError> + Send + Sync>;

/// Registry of templates selectable through `AdminConfig::template`
///
/// The `default` template is always registered.
#[derive(Clone)]
pub struct TemplateRegistry {
    factories: HashMap<String, TemplateFactory>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.factories.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("TemplateRegistry").field("templates", &names).finish()
    }
}

impl TemplateRegistry {
    /// Create a registry containing the `default` template
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register(DefaultTemplate::NAME, |config| {
            Ok(Arc::new(DefaultTemplate::new(config)?) as Arc<dyn Template>)
        });
        registry
    }

    /// Register a template factory under a name, replacing any previous one
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&AdminConfig) -> Result<Arc<dyn Template>, AdminError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    /// Check whether a template name is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the template named by the configuration
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Template`] if no template is registered under
    /// `config.template`, or whatever the factory itself reports.
    pub fn resolve(&self, config: &AdminConfig) -> Result<Arc<dyn Template>, AdminError> {
        let Some(factory) = self.factories.get(&config.template) else {
            return Err(AdminError::Template(format!(
                "Template class [{}] not found",
                config.template
            )));
        };

        factory(config)
    }
}
