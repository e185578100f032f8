//! Model registry
//!
//! Each administered model is described by a [`ModelConfiguration`]: its
//! URL alias, title, display and form factories, record source, permitted
//! actions, optional custom controller and lifecycle listeners. The
//! [`ModelConfigurationManager`] holds them for the lifetime of the admin.

pub mod configuration;
pub mod events;
pub mod manager;
pub mod repository;

pub use configuration::{default_alias, DisplayFactory, FormFactory, ModelConfiguration};
pub use events::{EventDispatcher, LifecycleEvent, Listener, ModelEvent};
pub use manager::ModelConfigurationManager;
pub use repository::{InMemoryRepository, Repository};
