//! The built-in CRUD controller

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use super::{AdminRequest, Controller};
use crate::error::AdminError;
use crate::form::FormErrors;
use crate::model::LifecycleEvent;

/// Action names of the admin routes
pub mod actions {
    /// List records
    pub const GET_DISPLAY: &str = "getDisplay";
    /// Show the create form
    pub const GET_CREATE: &str = "getCreate";
    /// Store a new record
    pub const POST_STORE: &str = "postStore";
    /// Show the edit form
    pub const GET_EDIT: &str = "getEdit";
    /// Update a record
    pub const POST_UPDATE: &str = "postUpdate";
    /// Delete a record
    pub const POST_DELETE: &str = "postDelete";
}

/// Lists, creates, edits and deletes records of any model
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminController;

impl AdminController {
    /// Registry name
    pub const NAME: &'static str = "AdminController";

    /// `AdminController@action`
    #[must_use]
    pub fn route_action(action: &str) -> String {
        format!("{}@{action}", Self::NAME)
    }
}

#[async_trait]
impl Controller for AdminController {
    async fn call(&self, action: &str, request: AdminRequest) -> Result<Response, AdminError> {
        match action {
            actions::GET_DISPLAY => get_display(&request).await,
            actions::GET_CREATE => get_create(&request),
            actions::POST_STORE => post_store(&request).await,
            actions::GET_EDIT => get_edit(&request).await,
            actions::POST_UPDATE => post_update(&request).await,
            actions::POST_DELETE => post_delete(&request).await,
            other => Err(AdminError::ActionNotFound(Self::route_action(other))),
        }
    }
}

fn not_allowed(request: &AdminRequest, action: &str) -> AdminError {
    AdminError::ActionNotAllowed(format!("{action} {}", request.model.alias()))
}

/// Render the listing of the addressed model
///
/// # Errors
///
/// Returns repository and render errors.
pub async fn get_display(request: &AdminRequest) -> Result<Response, AdminError> {
    let model = &request.model;
    let rows = model.records().all().await?;

    let links = request.links();
    let ctx = request.render_context(&links);

    let mut display = model.make_display();
    if display.title().is_none() {
        display = display.with_title(model.title_text());
    }
    if !model.is_editable() && !model.is_deletable() {
        display.columns_mut().disable_controls();
    }

    let html = display.render(&ctx, &rows)?;
    request.page(html)
}

/// Render the create form
///
/// # Errors
///
/// Returns [`AdminError::ActionNotAllowed`] if the model is not creatable.
pub fn get_create(request: &AdminRequest) -> Result<Response, AdminError> {
    let action = request
        .links()
        .create_url()
        .ok_or_else(|| not_allowed(request, "create"))?;

    render_form(request, &Value::Null, &action, &FormErrors::new(), StatusCode::OK)
}

/// Validate and store a submitted record
///
/// # Errors
///
/// Returns [`AdminError::ActionNotAllowed`] if the model is not creatable,
/// and repository errors.
pub async fn post_store(request: &AdminRequest) -> Result<Response, AdminError> {
    let links = request.links();
    let action = links
        .create_url()
        .ok_or_else(|| not_allowed(request, "create"))?;

    let form = request.model.make_form();
    if let Err(errors) = form.validate(&request.input) {
        let submitted = submitted_row(&request.input);
        return render_form(request, &submitted, &action, &errors, StatusCode::UNPROCESSABLE_ENTITY);
    }

    let attributes = form.extract(&request.input);
    let models = request.state.models();
    let class = request.model.class();

    if models.fire(class, LifecycleEvent::Creating, Value::Object(attributes.clone()), true) {
        let record = request.model.records().create(attributes).await?;
        tracing::info!(alias = request.model.alias(), "Record created");
        models.fire(class, LifecycleEvent::Created, record, false);
    }

    Ok(request.redirect(&links.display_url()))
}

/// Render the edit form of the addressed record
///
/// # Errors
///
/// Returns [`AdminError::ActionNotAllowed`] if the model is not editable and
/// [`AdminError::RecordNotFound`] if the record does not exist.
pub async fn get_edit(request: &AdminRequest) -> Result<Response, AdminError> {
    let id = request.require_id()?;
    let action = request
        .links()
        .edit_url(id)
        .ok_or_else(|| not_allowed(request, "edit"))?;

    let record = find_record(request, id).await?;
    render_form(request, &record, &action, &FormErrors::new(), StatusCode::OK)
}

/// Validate and apply a submitted update
///
/// # Errors
///
/// Returns [`AdminError::ActionNotAllowed`] if the model is not editable,
/// [`AdminError::RecordNotFound`] if the record does not exist, and
/// repository errors.
pub async fn post_update(request: &AdminRequest) -> Result<Response, AdminError> {
    let id = request.require_id()?;
    let links = request.links();
    let action = links
        .edit_url(id)
        .ok_or_else(|| not_allowed(request, "edit"))?;

    let record = find_record(request, id).await?;
    let form = request.model.make_form();
    if let Err(errors) = form.validate(&request.input) {
        let mut submitted = record;
        if let (Value::Object(row), Value::Object(input)) =
            (&mut submitted, submitted_row(&request.input))
        {
            row.extend(input);
        }
        return render_form(request, &submitted, &action, &errors, StatusCode::UNPROCESSABLE_ENTITY);
    }

    let attributes = form.extract(&request.input);
    let models = request.state.models();
    let class = request.model.class();

    if models.fire(class, LifecycleEvent::Updating, Value::Object(attributes.clone()), true) {
        let record = request.model.records().update(id, attributes).await?;
        tracing::info!(alias = request.model.alias(), id, "Record updated");
        models.fire(class, LifecycleEvent::Updated, record, false);
    }

    Ok(request.redirect(&links.display_url()))
}

/// Delete the addressed record
///
/// # Errors
///
/// Returns [`AdminError::ActionNotAllowed`] if the model is not deletable,
/// [`AdminError::RecordNotFound`] if the record does not exist, and
/// repository errors.
pub async fn post_delete(request: &AdminRequest) -> Result<Response, AdminError> {
    let id = request.require_id()?;
    let links = request.links();
    if links.delete_url(id).is_none() {
        return Err(not_allowed(request, "delete"));
    }

    let record = find_record(request, id).await?;
    let models = request.state.models();
    let class = request.model.class();

    if models.fire(class, LifecycleEvent::Deleting, record.clone(), true) {
        request.model.records().delete(id).await?;
        tracing::info!(alias = request.model.alias(), id, "Record deleted");
        models.fire(class, LifecycleEvent::Deleted, record, false);
    }

    Ok(request.redirect(&links.display_url()))
}

async fn find_record(request: &AdminRequest, id: &str) -> Result<Value, AdminError> {
    request
        .model
        .records()
        .find(id)
        .await?
        .ok_or_else(|| AdminError::RecordNotFound(format!("{}/{id}", request.model.alias())))
}

fn render_form(
    request: &AdminRequest,
    row: &Value,
    action: &str,
    errors: &FormErrors,
    status: StatusCode,
) -> Result<Response, AdminError> {
    let links = request.links();
    let ctx = request.render_context(&links);

    let mut form = request.model.make_form();
    if form.title().is_none() {
        form = form.with_title(request.model.title_text());
    }

    let html = form.render(&ctx, row, action, errors)?;
    let page = request.page(html)?;
    Ok((status, page).into_response())
}

fn submitted_row(input: &HashMap<String, String>) -> Value {
    Value::Object(
        input
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect::<Map<_, _>>(),
    )
}
