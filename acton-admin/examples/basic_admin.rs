//! Basic acton-admin panel
//!
//! Demonstrates:
//! - Configuration loading
//! - Observability initialization
//! - Models with table displays, forms and lifecycle listeners
//! - A custom controller taking over one model's listing
//!
//! Run with: `cargo run --example basic_admin`

use acton_admin::observability::{self, ObservabilityConfig};
use acton_admin::prelude::*;
use async_trait::async_trait;
use axum::response::{Html, Response};

struct ReportController;

#[async_trait]
impl Controller for ReportController {
    async fn call(&self, action: &str, request: AdminRequest) -> Result<Response, AdminError> {
        if action != actions::GET_DISPLAY {
            return AdminController.call(action, request).await;
        }

        let rows = request.model.records().all().await?;
        let html = format!("<p>{} reports on file</p>", rows.len());
        request.page(html)
    }
}

fn posts() -> ModelConfiguration {
    ModelConfiguration::new("blog::Post")
        .title("Blog posts")
        .display(|| {
            TableDisplay::table()
                .with_columns([
                    Column::named("id"),
                    Column::image("cover").image_width("64px"),
                    Column::named("title"),
                    Column::named("author.name").label("Author"),
                ])
                .with_extension(Actions::new().with(
                    DisplayAction::new("export", "/admin/exports/posts").method("GET"),
                ))
        })
        .form(|| {
            FormDefinition::new()
                .element(FormElement::text("title").required())
                .element(FormElement::textarea("body").rows(8))
                .element(FormElement::checkbox("published"))
                .element(FormElement::select(
                    "status",
                    [("draft", "Draft"), ("review", "In review")],
                ))
        })
        .repository(InMemoryRepository::default().with_records([
            json!({ "id": 1, "title": "Hello", "cover": "covers/hello.png", "author": { "name": "Ada" } }),
            json!({ "id": 2, "title": "Release notes", "cover": "", "author": { "name": "Grace" } }),
        ]))
        .created(|event: &ModelEvent| {
            tracing::info!(payload = %event.payload, "Post created");
            true
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init_with(&ObservabilityConfig::new("basic-admin"))?;

    let config = AdminConfig::load_for_service("basic-admin")?;
    tracing::info!(prefix = %config.url_prefix, template = %config.template, "Configuration loaded");

    let admin = AdminBuilder::new(config)
        .controller("ReportController", ReportController)
        .register(|ctx| {
            ctx.model(posts());
            ctx.model(ModelConfiguration::new("audit::Report").controller("ReportController"));
        })
        .routes(|router| {
            router.route(
                "/exports/posts",
                axum::routing::get(|| async { Html("<pre>id,title</pre>") }),
            )
        })
        .build()?;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Admin listening on http://127.0.0.1:3000/admin");

    axum::serve(listener, admin.router()).await?;

    Ok(())
}
