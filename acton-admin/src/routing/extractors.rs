//! Route parameter extractors
//!
//! axum path segments match anything, so the admin parameters enforce their
//! patterns here. A segment that does not match rejects the request with a
//! 404, the same outcome as a route that never matched.
//!
//! ```rust,no_run
//! use acton_admin::routing::{ModelAlias, ModelId};
//!
//! async fn show(ModelAlias(alias): ModelAlias, ModelId(id): ModelId) -> String {
//!     format!("{alias}/{id}")
//! }
//! ```

use axum::{
    extract::{FromRef, FromRequestParts, RawPathParams},
    http::request::Parts,
};

use super::alias::is_route_segment;
use crate::error::AdminError;
use crate::state::AdminState;

/// Name of the alias route parameter
pub const MODEL_PARAM: &str = "adminModel";

/// Name of the record key route parameter
pub const MODEL_ID_PARAM: &str = "adminModelId";

/// Alias segment constrained to the registered aliases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAlias(pub String);

/// Record key segment constrained to `[a-zA-Z0-9_-]+`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelId(pub String);

async fn path_param(parts: &mut Parts, name: &str) -> Result<String, AdminError> {
    let params = RawPathParams::from_request_parts(parts, &())
        .await
        .map_err(|rejection| AdminError::BadRequest(rejection.body_text()))?;

    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| AdminError::BadRequest(format!("missing route parameter {name}")))
}

impl<S> FromRequestParts<S> for ModelAlias
where
    S: Send + Sync,
    AdminState: FromRef<S>,
{
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let alias = path_param(parts, MODEL_PARAM).await?;
        let state = AdminState::from_ref(state);

        if !state.router().aliases().matches(&alias) {
            return Err(AdminError::ModelNotFound(alias));
        }

        Ok(Self(alias))
    }
}

impl<S> FromRequestParts<S> for ModelId
where
    S: Send + Sync,
{
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = path_param(parts, MODEL_ID_PARAM).await?;

        if !is_route_segment(&id) {
            return Err(AdminError::RecordNotFound(id));
        }

        Ok(Self(id))
    }
}
