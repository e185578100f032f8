//! Display-level action buttons

use serde::Serialize;
use serde_json::json;

use super::{DisplayData, DisplayExtension};
use crate::display::RenderContext;
use crate::error::AdminError;
use crate::template::helpers;

/// One button drawn above the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayAction {
    /// Value submitted as `action`
    pub name: String,
    /// Button text, defaulted from the name on initialization
    pub label: Option<String>,
    /// Target URL
    pub url: String,
    /// Form method
    pub method: String,
}

impl DisplayAction {
    /// `POST` action submitting to `url`
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            url: url.into(),
            method: "POST".to_string(),
        }
    }

    /// Set the button text
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the form method
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }
}

/// Extension rendering a row of [`DisplayAction`] buttons
#[derive(Debug, Clone)]
pub struct Actions {
    actions: Vec<DisplayAction>,
    view: String,
    initialized: bool,
}

impl Default for Actions {
    fn default() -> Self {
        Self::new()
    }
}

impl Actions {
    /// Empty action bar
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            view: "display.extensions.actions".to_string(),
            initialized: false,
        }
    }

    /// Add an action, keeping insertion order
    #[must_use]
    pub fn with(mut self, action: DisplayAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an action, keeping insertion order
    pub fn push(&mut self, action: DisplayAction) -> &mut Self {
        self.actions.push(action);
        self
    }

    /// Actions in display order
    #[must_use]
    pub fn all(&self) -> &[DisplayAction] {
        &self.actions
    }
}

impl DisplayExtension for Actions {
    fn name(&self) -> &str {
        "actions"
    }

    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        for action in &mut self.actions {
            if action.label.is_none() {
                action.label = Some(helpers::humanize(&action.name));
            }
        }

        self.initialized = true;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn render(&self, ctx: &RenderContext<'_>, _data: &DisplayData<'_>) -> Result<String, AdminError> {
        if self.actions.is_empty() {
            return Ok(String::new());
        }

        ctx.template
            .render(&self.view, json!({ "actions": self.actions }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::MockTemplate;

    #[test]
    fn test_initialize_defaults_labels() {
        let mut actions = Actions::new()
            .with(DisplayAction::new("export_csv", "/admin/posts/export"))
            .with(DisplayAction::new("purge", "/admin/posts/purge").label("Empty trash"));
        actions.initialize();

        assert_eq!(actions.all()[0].label.as_deref(), Some("Export csv"));
        assert_eq!(actions.all()[1].label.as_deref(), Some("Empty trash"));
        assert!(actions.is_initialized());
    }

    #[test]
    fn test_empty_actions_render_nothing() {
        let template = MockTemplate::new();
        let ctx = RenderContext::new(&template);
        let data = DisplayData {
            attributes: "",
            collection: &[],
        };
        assert_eq!(Actions::new().render(&ctx, &data).unwrap(), "");
    }

    #[test]
    fn test_render_uses_actions_view() {
        let mut template = MockTemplate::new();
        template
            .expect_render()
            .withf(|view, context| {
                view == "display.extensions.actions" && context["actions"][0]["method"] == "GET"
            })
            .returning(|_, _| Ok("<div></div>".to_string()));

        let actions = Actions::new().with(DisplayAction::new("export", "/x").method("GET"));
        let ctx = RenderContext::new(&template);
        let data = DisplayData {
            attributes: "",
            collection: &[],
        };
        assert_eq!(actions.render(&ctx, &data).unwrap(), "<div></div>");
    }
}
