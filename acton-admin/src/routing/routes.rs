//! Admin HTTP routes
//!
//! Every handler names the `AdminController@action` it stands for and hands
//! it to the alias router, which may swap in the model's own controller.

use std::collections::HashMap;

use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Form, Router,
};
use axum_htmx::{HxBoosted, HxRequest};
use serde_json::json;

use super::extractors::{ModelAlias, ModelId};
use crate::controller::{actions, AdminController, AdminRequest};
use crate::error::AdminError;
use crate::state::AdminState;

/// Routes relative to the admin prefix
pub(crate) fn admin_routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/{adminModel}", get(display))
        .route("/{adminModel}/create", get(create).post(store))
        .route("/{adminModel}/{adminModelId}/edit", get(edit).post(update))
        .route(
            "/{adminModel}/{adminModelId}/delete",
            post(destroy).delete(destroy),
        )
}

fn is_partial(HxRequest(htmx): HxRequest, HxBoosted(boosted): HxBoosted) -> bool {
    htmx && !boosted
}

async fn dispatch(
    state: AdminState,
    alias: &str,
    id: Option<String>,
    action: &str,
    input: HashMap<String, String>,
    partial: bool,
) -> Result<Response, AdminError> {
    let bound = state
        .router()
        .bind(alias, &AdminController::route_action(action))?;
    let controller = state.controllers().get(bound.target.controller())?;

    let request = AdminRequest {
        state: state.clone(),
        model: bound.model,
        id,
        input,
        partial,
    };

    controller.call(bound.target.action(), request).await
}

async fn dashboard(
    State(state): State<AdminState>,
    htmx: HxRequest,
    boosted: HxBoosted,
) -> Result<Response, AdminError> {
    let content = state.template().render(
        "dashboard",
        json!({ "navigation": state.navigation().pages() }),
    )?;

    state.render_page("Dashboard", content, &state.home_url(), is_partial(htmx, boosted))
}

async fn display(
    State(state): State<AdminState>,
    ModelAlias(alias): ModelAlias,
    htmx: HxRequest,
    boosted: HxBoosted,
) -> Result<Response, AdminError> {
    let partial = is_partial(htmx, boosted);
    dispatch(state, &alias, None, actions::GET_DISPLAY, HashMap::new(), partial).await
}

async fn create(
    State(state): State<AdminState>,
    ModelAlias(alias): ModelAlias,
    htmx: HxRequest,
    boosted: HxBoosted,
) -> Result<Response, AdminError> {
    let partial = is_partial(htmx, boosted);
    dispatch(state, &alias, None, actions::GET_CREATE, HashMap::new(), partial).await
}

async fn store(
    State(state): State<AdminState>,
    ModelAlias(alias): ModelAlias,
    htmx: HxRequest,
    boosted: HxBoosted,
    Form(input): Form<HashMap<String, String>>,
) -> Result<Response, AdminError> {
    let partial = is_partial(htmx, boosted);
    dispatch(state, &alias, None, actions::POST_STORE, input, partial).await
}

async fn edit(
    State(state): State<AdminState>,
    ModelAlias(alias): ModelAlias,
    ModelId(id): ModelId,
    htmx: HxRequest,
    boosted: HxBoosted,
) -> Result<Response, AdminError> {
    let partial = is_partial(htmx, boosted);
    dispatch(state, &alias, Some(id), actions::GET_EDIT, HashMap::new(), partial).await
}

async fn update(
    State(state): State<AdminState>,
    ModelAlias(alias): ModelAlias,
    ModelId(id): ModelId,
    htmx: HxRequest,
    boosted: HxBoosted,
    Form(input): Form<HashMap<String, String>>,
) -> Result<Response, AdminError> {
    let partial = is_partial(htmx, boosted);
    dispatch(state, &alias, Some(id), actions::POST_UPDATE, input, partial).await
}

async fn destroy(
    State(state): State<AdminState>,
    ModelAlias(alias): ModelAlias,
    ModelId(id): ModelId,
    htmx: HxRequest,
    boosted: HxBoosted,
) -> Result<Response, AdminError> {
    let partial = is_partial(htmx, boosted);
    dispatch(state, &alias, Some(id), actions::POST_DELETE, HashMap::new(), partial).await
}

#[cfg(test)]
mod tests {
    use crate::bootstrap::AdminBuilder;
    use crate::config::AdminConfig;
    use crate::display::{Column, TableDisplay};
    use crate::form::{FormDefinition, FormElement};
    use crate::model::{InMemoryRepository, ModelConfiguration};
    use crate::testing::{
        assert_fragment, assert_full_page, assert_hx_redirect, assert_redirect, TestServer,
    };
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use serde_json::json;

    fn server() -> TestServer {
        let config = AdminConfig {
            middleware: Vec::new(),
            ..AdminConfig::default()
        };
        let admin = AdminBuilder::new(config)
            .model(
                ModelConfiguration::new("blog::Post")
                    .display(|| {
                        TableDisplay::table().with_columns([Column::named("id"), Column::named("title")])
                    })
                    .form(|| FormDefinition::new().element(FormElement::text("title").required()))
                    .repository(InMemoryRepository::default().with_records([
                        json!({ "id": 1, "title": "Hello" }),
                        json!({ "id": 2, "title": "World" }),
                    ])),
            )
            .build()
            .unwrap();

        TestServer::new(admin.router()).unwrap()
    }

    fn hx_request() -> (HeaderName, HeaderValue) {
        (HeaderName::from_static("hx-request"), HeaderValue::from_static("true"))
    }

    #[tokio::test]
    async fn test_dashboard_lists_models() {
        let response = server().get("/admin").await;
        response.assert_status_ok();
        assert!(response.text().contains(r#"href="/admin/posts""#));
    }

    #[tokio::test]
    async fn test_listing_renders_rows() {
        let response = server().get("/admin/posts").await;
        response.assert_status_ok();
        assert_full_page(&response);
        let body = response.text();
        assert!(body.contains("Hello"));
        assert!(body.contains("/admin/posts/2/edit"));
    }

    #[tokio::test]
    async fn test_htmx_listing_is_a_fragment() {
        let (name, value) = hx_request();
        let response = server().get("/admin/posts").add_header(name, value).await;
        response.assert_status_ok();
        assert_fragment(&response);
        assert!(response.text().contains("World"));
    }

    #[tokio::test]
    async fn test_unknown_alias_is_not_found() {
        server()
            .get("/admin/comments")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_record_key_is_not_found() {
        server()
            .get("/admin/posts/1.5/edit")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_redirects_to_listing() {
        let server = server();
        let response = server
            .post("/admin/posts/create")
            .form(&[("title", "Third")])
            .await;
        assert_redirect(&response, "/admin/posts");

        let listing = server.get("/admin/posts").await;
        assert!(listing.text().contains("Third"));
    }

    #[tokio::test]
    async fn test_store_with_missing_field_rerenders_form() {
        let response = server()
            .post("/admin/posts/create")
            .form(&[("title", "")])
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.text().contains("The title field is required."));
    }

    #[tokio::test]
    async fn test_htmx_delete_uses_hx_redirect() {
        let server = server();
        let (name, value) = hx_request();
        let response = server.post("/admin/posts/1/delete").add_header(name, value).await;
        assert_hx_redirect(&response, "/admin/posts");

        let listing = server.get("/admin/posts").await;
        assert!(!listing.text().contains("Hello"));
    }

    #[tokio::test]
    async fn test_edit_missing_record() {
        server()
            .get("/admin/posts/99/edit")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
