//! Per-model configuration
//!
//! ```rust
//! use acton_admin::display::{Column, TableDisplay};
//! use acton_admin::form::{FormDefinition, FormElement};
//! use acton_admin::model::ModelConfiguration;
//!
//! struct Post;
//!
//! let posts = ModelConfiguration::for_model::<Post>()
//!     .title("Blog posts")
//!     .display(|| TableDisplay::table().with_columns([Column::named("title")]))
//!     .form(|| FormDefinition::new().element(FormElement::text("title").required()))
//!     .deletable(false);
//!
//! assert_eq!(posts.alias(), "posts");
//! assert!(!posts.is_deletable());
//! ```

use std::fmt;
use std::sync::Arc;

use super::events::{LifecycleEvent, Listener, ModelEvent};
use super::repository::{InMemoryRepository, Repository};
use crate::display::{Column, TableDisplay};
use crate::form::FormDefinition;
use crate::routing::ModelLinks;
use crate::template::helpers;

/// Builds a fresh display for each request
pub type DisplayFactory = Arc<dyn Fn() -> TableDisplay + Send + Sync>;

/// Builds a fresh form for each request
pub type FormFactory = Arc<dyn Fn() -> FormDefinition + Send + Sync>;

/// How one model is listed, edited and routed
#[derive(Clone)]
pub struct ModelConfiguration {
    class: String,
    alias: String,
    alias_is_explicit: bool,
    title: Option<String>,
    controller: Option<String>,
    key_name: String,
    display: DisplayFactory,
    form: FormFactory,
    repository: Arc<dyn Repository>,
    creatable: bool,
    editable: bool,
    deletable: bool,
    listeners: Vec<(LifecycleEvent, Listener)>,
}

impl ModelConfiguration {
    /// Configuration for the model class `class`
    ///
    /// The alias defaults to the pluralised snake case of the class basename.
    pub fn new(class: impl Into<String>) -> Self {
        let class = class.into();
        let alias = default_alias(&class);

        Self {
            class,
            alias,
            alias_is_explicit: false,
            title: None,
            controller: None,
            key_name: "id".to_string(),
            display: Arc::new(|| TableDisplay::table().with_columns([Column::named("id")])),
            form: Arc::new(FormDefinition::new),
            repository: Arc::new(InMemoryRepository::default()),
            creatable: true,
            editable: true,
            deletable: true,
            listeners: Vec::new(),
        }
    }

    /// Configuration keyed by the Rust type name of `T`
    #[must_use]
    pub fn for_model<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// Set the URL alias
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self.alias_is_explicit = true;
        self
    }

    /// Set the page title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Handle this model's routes with a custom controller
    #[must_use]
    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    /// Attribute holding the record key
    #[must_use]
    pub fn key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    /// Set how the listing is built
    #[must_use]
    pub fn display<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> TableDisplay + Send + Sync + 'static,
    {
        self.display = Arc::new(factory);
        self
    }

    /// Set how create and edit forms are built
    #[must_use]
    pub fn form<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> FormDefinition + Send + Sync + 'static,
    {
        self.form = Arc::new(factory);
        self
    }

    /// Set the record source
    #[must_use]
    pub fn repository(mut self, repository: impl Repository + 'static) -> Self {
        self.repository = Arc::new(repository);
        self
    }

    /// Share a record source with other code
    #[must_use]
    pub fn shared_repository(mut self, repository: Arc<dyn Repository>) -> Self {
        self.repository = repository;
        self
    }

    /// Permit or forbid creating records
    #[must_use]
    pub fn creatable(mut self, creatable: bool) -> Self {
        self.creatable = creatable;
        self
    }

    /// Permit or forbid editing records
    #[must_use]
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Permit or forbid deleting records
    #[must_use]
    pub fn deletable(mut self, deletable: bool) -> Self {
        self.deletable = deletable;
        self
    }

    /// Listen on a lifecycle event
    #[must_use]
    pub fn on<F>(mut self, event: LifecycleEvent, listener: F) -> Self
    where
        F: Fn(&ModelEvent) -> bool + Send + Sync + 'static,
    {
        self.listeners.push((event, Arc::new(listener)));
        self
    }

    /// Run before a record is created; returning `false` cancels it
    #[must_use]
    pub fn creating<F>(self, listener: F) -> Self
    where
        F: Fn(&ModelEvent) -> bool + Send + Sync + 'static,
    {
        self.on(LifecycleEvent::Creating, listener)
    }

    /// Run after a record was created
    #[must_use]
    pub fn created<F>(self, listener: F) -> Self
    where
        F: Fn(&ModelEvent) -> bool + Send + Sync + 'static,
    {
        self.on(LifecycleEvent::Created, listener)
    }

    /// Run before a record is updated; returning `false` cancels it
    #[must_use]
    pub fn updating<F>(self, listener: F) -> Self
    where
        F: Fn(&ModelEvent) -> bool + Send + Sync + 'static,
    {
        self.on(LifecycleEvent::Updating, listener)
    }

    /// Run after a record was updated
    #[must_use]
    pub fn updated<F>(self, listener: F) -> Self
    where
        F: Fn(&ModelEvent) -> bool + Send + Sync + 'static,
    {
        self.on(LifecycleEvent::Updated, listener)
    }

    /// Run before a record is deleted; returning `false` cancels it
    #[must_use]
    pub fn deleting<F>(self, listener: F) -> Self
    where
        F: Fn(&ModelEvent) -> bool + Send + Sync + 'static,
    {
        self.on(LifecycleEvent::Deleting, listener)
    }

    /// Run after a record was deleted
    #[must_use]
    pub fn deleted<F>(self, listener: F) -> Self
    where
        F: Fn(&ModelEvent) -> bool + Send + Sync + 'static,
    {
        self.on(LifecycleEvent::Deleted, listener)
    }

    /// Replace a defaulted alias; an alias set with [`with_alias`](Self::with_alias) wins
    pub(crate) fn apply_alias_override(&mut self, alias: &str) {
        if !self.alias_is_explicit {
            self.alias = alias.to_string();
        }
    }

    pub(crate) fn take_listeners(&mut self) -> Vec<(LifecycleEvent, Listener)> {
        std::mem::take(&mut self.listeners)
    }

    /// Model class
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// URL alias
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Page title, defaulting to the humanized alias
    #[must_use]
    pub fn title_text(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| helpers::humanize(&self.alias))
    }

    /// Custom controller name, if any
    #[must_use]
    pub fn controller_name(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    /// Attribute holding the record key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key_name
    }

    /// Fresh display
    #[must_use]
    pub fn make_display(&self) -> TableDisplay {
        (self.display)()
    }

    /// Fresh form
    #[must_use]
    pub fn make_form(&self) -> FormDefinition {
        (self.form)()
    }

    /// Record source
    #[must_use]
    pub fn records(&self) -> &dyn Repository {
        self.repository.as_ref()
    }

    /// Whether records may be created
    #[must_use]
    pub const fn is_creatable(&self) -> bool {
        self.creatable
    }

    /// Whether records may be edited
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.editable
    }

    /// Whether records may be deleted
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        self.deletable
    }

    /// Route URLs under the normalised `prefix`, gated by the permissions
    #[must_use]
    pub fn links(&self, prefix: &str) -> ModelLinks {
        ModelLinks::new(prefix, &self.alias)
            .creatable(self.creatable)
            .editable(self.editable)
            .deletable(self.deletable)
    }
}

impl fmt::Debug for ModelConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfiguration")
            .field("class", &self.class)
            .field("alias", &self.alias)
            .field("controller", &self.controller)
            .field("key_name", &self.key_name)
            .field("creatable", &self.creatable)
            .field("editable", &self.editable)
            .field("deletable", &self.deletable)
            .finish_non_exhaustive()
    }
}

/// Pluralised snake case of the class basename: `blog::BlogPost` → `blog_posts`
#[must_use]
pub fn default_alias(class: &str) -> String {
    let without_generics = class.split('<').next().unwrap_or(class);
    let basename = without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .rsplit('\\')
        .next()
        .unwrap_or(without_generics);

    pluralize(&snake_case(basename))
}

fn snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;

    for c in name.chars() {
        if c.is_uppercase() {
            if previous_lower {
                snake.push('_');
            }
            snake.extend(c.to_lowercase());
            previous_lower = false;
        } else {
            snake.push(c);
            previous_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }

    snake
}

fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| word.ends_with(suffix)) {
        return format!("{word}es");
    }

    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BlogPost;

    #[test]
    fn test_default_alias() {
        assert_eq!(default_alias("blog::Post"), "posts");
        assert_eq!(default_alias("blog::BlogPost"), "blog_posts");
        assert_eq!(default_alias("shop::Category"), "categories");
        assert_eq!(default_alias("shop::Box"), "boxes");
        assert_eq!(default_alias("shop::Day"), "days");
        assert_eq!(default_alias("App\\Models\\User"), "users");
        assert_eq!(default_alias("store::Wrapper<u8>"), "wrappers");
    }

    #[test]
    fn test_for_model_uses_type_name() {
        let config = ModelConfiguration::for_model::<BlogPost>();
        assert!(config.class().ends_with("BlogPost"));
        assert_eq!(config.alias(), "blog_posts");
        assert_eq!(config.title_text(), "Blog posts");
    }

    #[test]
    fn test_explicit_alias_wins_over_override() {
        let mut explicit = ModelConfiguration::new("blog::Post").with_alias("articles");
        explicit.apply_alias_override("entries");
        assert_eq!(explicit.alias(), "articles");

        let mut defaulted = ModelConfiguration::new("blog::Post");
        defaulted.apply_alias_override("entries");
        assert_eq!(defaulted.alias(), "entries");
    }

    #[test]
    fn test_links_follow_permissions() {
        let config = ModelConfiguration::new("blog::Post")
            .creatable(false)
            .editable(true)
            .deletable(false);
        let links = config.links("/admin");

        assert_eq!(links.create_url(), None);
        assert_eq!(links.edit_url("1").as_deref(), Some("/admin/posts/1/edit"));
        assert_eq!(links.delete_url("1"), None);
    }

    #[test]
    fn test_factories_build_fresh_instances() {
        let config = ModelConfiguration::new("blog::Post")
            .display(|| TableDisplay::table().with_columns([Column::named("title")]));

        let mut first = config.make_display();
        first.initialize();
        let second = config.make_display();

        assert!(first.is_initialized());
        assert!(!second.is_initialized());
        assert_eq!(second.columns().all().len(), 1);
    }

    #[test]
    fn test_listeners_are_collected() {
        let mut config = ModelConfiguration::new("blog::Post")
            .creating(|_| true)
            .deleted(|_| true);
        let listeners = config.take_listeners();

        assert_eq!(listeners.len(), 2);
        assert_eq!(listeners[0].0, LifecycleEvent::Creating);
        assert!(config.take_listeners().is_empty());
    }
}
