//! Alias routing
//!
//! Models are addressed in URLs by an alias (`/admin/posts`) rather than by
//! their class. The [`AliasMap`] holds the alias/class pairs built at boot,
//! the [`AliasRouter`] binds a request's alias segment to the model
//! configuration and picks the controller, and [`ModelLinks`] generates the
//! URLs pointing back at a model.

pub mod alias;
pub mod extractors;
pub mod links;
pub mod router;
pub(crate) mod routes;

pub use alias::{is_route_segment, AliasMap};
pub use extractors::{ModelAlias, ModelId, MODEL_ID_PARAM, MODEL_PARAM};
pub use links::ModelLinks;
pub use router::{AliasRouter, BoundModel, DispatchTarget};
