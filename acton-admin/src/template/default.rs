//! The built-in `default` template
//!
//! Views are compiled into the binary and loaded into a `minijinja`
//! environment at boot. A file with the same relative path under
//! `{bootstrap_directory}/views/` replaces the embedded view, so
//! `admin/views/display/extensions/columns.html` overrides the columns table.

use minijinja::{AutoEscape, Environment, Output, State, Value};
use std::fmt::Write;
use std::path::Path;

use super::{helpers, namespaced_view_path, Template};
use crate::config::AdminConfig;
use crate::error::AdminError;

/// Embedded views, keyed by their path relative to the template namespace
const VIEWS: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/default/layout.html")),
    ("dashboard.html", include_str!("../../templates/default/dashboard.html")),
    ("display/table.html", include_str!("../../templates/default/display/table.html")),
    (
        "display/extensions/columns.html",
        include_str!("../../templates/default/display/extensions/columns.html"),
    ),
    (
        "display/extensions/actions.html",
        include_str!("../../templates/default/display/extensions/actions.html"),
    ),
    ("form/default.html", include_str!("../../templates/default/form/default.html")),
    (
        "form/element/errors.html",
        include_str!("../../templates/default/form/element/errors.html"),
    ),
    (
        "form/element/text.html",
        include_str!("../../templates/default/form/element/text.html"),
    ),
    (
        "form/element/password.html",
        include_str!("../../templates/default/form/element/password.html"),
    ),
    (
        "form/element/checkbox.html",
        include_str!("../../templates/default/form/element/checkbox.html"),
    ),
    (
        "form/element/textarea.html",
        include_str!("../../templates/default/form/element/textarea.html"),
    ),
    (
        "form/element/select.html",
        include_str!("../../templates/default/form/element/select.html"),
    ),
];

/// Template backed by a `minijinja` environment
#[derive(Debug)]
pub struct DefaultTemplate {
    env: Environment<'static>,
    asset_url: String,
}

impl DefaultTemplate {
    /// Registry name of this template
    pub const NAME: &'static str = "default";

    /// Load every view, preferring overrides from the bootstrap directory
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Template`] if an override cannot be read and
    /// [`AdminError::Render`] if a view does not compile.
    pub fn new(config: &AdminConfig) -> Result<Self, AdminError> {
        let overrides = config.views_directory();
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_formatter(format_value);

        for (relative, embedded) in VIEWS {
            let source = Self::load_view(relative, embedded, &overrides)?;
            env.add_template_owned(format!("{}/{relative}", Self::NAME), source)?;
        }

        Ok(Self {
            env,
            asset_url: config.assets.url.clone(),
        })
    }

    fn load_view(relative: &str, embedded: &str, overrides: &Path) -> Result<String, AdminError> {
        let path = overrides.join(relative);
        if !path.exists() {
            return Ok(embedded.to_string());
        }

        tracing::debug!(view = relative, path = %path.display(), "Using view override");
        std::fs::read_to_string(&path).map_err(|e| {
            AdminError::Template(format!("failed to read view '{}': {e}", path.display()))
        })
    }
}

/// Like minijinja's escaping formatter, but leaves `/` unescaped in URLs
fn format_value(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), minijinja::Error> {
    if matches!(state.auto_escape(), AutoEscape::Html) && !value.is_safe() {
        if let Some(text) = value.as_str() {
            out.write_str(&helpers::escape_html(text))?;
            return Ok(());
        }
    }
    minijinja::escape_formatter(out, state, value)
}

impl Template for DefaultTemplate {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn view_path(&self, view: &str) -> String {
        namespaced_view_path(Self::NAME, view)
    }

    fn render(&self, view: &str, context: serde_json::Value) -> Result<String, AdminError> {
        let path = self.view_path(view);
        let html = self.env.get_template(&path)?.render(context)?;
        Ok(html)
    }

    fn asset(&self, path: &str) -> String {
        helpers::asset(&self.asset_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template() -> DefaultTemplate {
        DefaultTemplate::new(&AdminConfig::default()).unwrap()
    }

    #[test]
    fn test_all_embedded_views_compile() {
        let template = template();
        for (relative, _) in VIEWS {
            let name = format!("default/{relative}");
            assert!(template.env.get_template(&name).is_ok(), "{name} missing");
        }
    }

    #[test]
    fn test_asset_uses_configured_base() {
        let config = AdminConfig {
            assets: crate::config::AssetSettings {
                url: "https://cdn.example.com/".to_string(),
            },
            ..AdminConfig::default()
        };
        let template = DefaultTemplate::new(&config).unwrap();
        assert_eq!(template.asset("photos/a.png"), "https://cdn.example.com/photos/a.png");
    }

    #[test]
    fn test_render_escapes_values() {
        let html = template()
            .render(
                "form.element.errors",
                json!({ "errors": ["<b>required</b>"] }),
            )
            .unwrap();
        assert!(html.contains("&lt;b&gt;required&lt;"));
    }

    #[test]
    fn test_urls_render_unescaped() {
        let html = template()
            .render(
                "dashboard",
                json!({ "navigation": [{ "title": "Posts", "url": "/admin/posts" }] }),
            )
            .unwrap();
        assert!(html.contains(r#"href="/admin/posts""#));
    }

    #[test]
    fn test_unknown_view_is_render_error() {
        let err = template().render("display.missing", json!({})).unwrap_err();
        assert!(matches!(err, AdminError::Render(_)));
    }

    #[test]
    fn test_override_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        let views = dir.path().join("views").join("form").join("element");
        std::fs::create_dir_all(&views).unwrap();
        std::fs::write(views.join("errors.html"), "custom:{{ errors|length }}").unwrap();

        let config = AdminConfig {
            bootstrap_directory: dir.path().to_path_buf(),
            ..AdminConfig::default()
        };
        let template = DefaultTemplate::new(&config).unwrap();
        let html = template
            .render("form.element.errors", json!({ "errors": ["a", "b"] }))
            .unwrap();
        assert_eq!(html, "custom:2");
    }
}
