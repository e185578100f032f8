//! acton-admin: declarative admin CRUD panels for axum applications
//!
//! Each model is described once by a [`ModelConfiguration`](model::ModelConfiguration):
//! how its records are listed (a table of columns plus display extensions),
//! how they are edited (a form of elements), where they are stored, and
//! which alias addresses it in URLs. The builder turns those descriptions
//! into an `axum::Router` serving a listing, create, edit and delete route
//! per model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use acton_admin::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     acton_admin::observability::init()?;
//!
//!     let config = AdminConfig::load_for_service("blog")?;
//!     let admin = AdminBuilder::new(config)
//!         .model(
//!             ModelConfiguration::new("blog::Post")
//!                 .display(|| {
//!                     TableDisplay::table().with_columns([Column::named("id"), Column::named("title")])
//!                 })
//!                 .form(|| FormDefinition::new().element(FormElement::text("title").required())),
//!         )
//!         .build()?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, admin.router()).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Request flow
//!
//! A request for `/admin/posts` passes the `posts` segment to the
//! [`AliasRouter`](routing::AliasRouter), which finds the model registered
//! under that alias and the controller handling it. The
//! [`AdminController`](controller::AdminController) builds the model's
//! [`TableDisplay`](display::TableDisplay), initializes its extensions once,
//! and renders it through the configured [`Template`](template::Template).
//! htmx requests get the fragment; everything else gets the full layout.

pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod form;
pub mod model;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod state;
pub mod template;

#[cfg(test)]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use acton_admin::prelude::*;
    //! ```

    pub use crate::bootstrap::{Admin, AdminBuilder, BootstrapContext};
    pub use crate::config::AdminConfig;
    pub use crate::controller::{actions, AdminController, AdminRequest, Controller};
    pub use crate::display::{
        Actions, Column, Columns, DisplayAction, DisplayExtension, RenderContext, TableDisplay,
    };
    pub use crate::error::AdminError;
    pub use crate::form::{FormDefinition, FormElement};
    pub use crate::model::{
        InMemoryRepository, LifecycleEvent, ModelConfiguration, ModelEvent, Repository,
    };
    pub use crate::navigation::Page;
    pub use crate::routing::{AliasRouter, ModelAlias, ModelId, ModelLinks};
    pub use crate::state::AdminState;
    pub use crate::template::{DefaultTemplate, Template};

    pub use axum;
    pub use serde_json::json;
}
