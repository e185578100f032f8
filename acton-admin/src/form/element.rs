//! Form elements
//!
//! Each element renders through `form.element.{kind}`, checks its own
//! submitted value and converts it back into row data.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::display::column::extract_value;
use crate::display::RenderContext;
use crate::error::AdminError;
use crate::template::helpers;

/// Option of a select element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Submitted value
    pub value: String,
    /// Display text
    pub label: String,
}

impl SelectOption {
    /// Create a new select option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Kind of form element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Single line text input
    Text,
    /// Masked input; the stored value is never echoed back
    Password,
    /// Boolean checkbox
    Checkbox,
    /// Multi-line text
    Textarea {
        /// Number of visible text lines
        rows: u32,
    },
    /// Dropdown
    Select {
        /// Available options
        options: Vec<SelectOption>,
    },
}

impl ElementKind {
    /// Short name, also the view suffix
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Checkbox => "checkbox",
            Self::Textarea { .. } => "textarea",
            Self::Select { .. } => "select",
        }
    }
}

/// Element attribute flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementFlags {
    /// Whether a value must be submitted
    pub required: bool,
    /// Whether the value is shown but not editable
    pub readonly: bool,
}

/// One editable attribute of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormElement {
    name: String,
    label: Option<String>,
    flags: ElementFlags,
    kind: ElementKind,
}

impl FormElement {
    fn with_kind(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            flags: ElementFlags::default(),
            kind,
        }
    }

    /// Text input
    pub fn text(name: impl Into<String>) -> Self {
        Self::with_kind(name, ElementKind::Text)
    }

    /// Password input
    pub fn password(name: impl Into<String>) -> Self {
        Self::with_kind(name, ElementKind::Password)
    }

    /// Checkbox
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::with_kind(name, ElementKind::Checkbox)
    }

    /// Textarea with five rows
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::with_kind(name, ElementKind::Textarea { rows: 5 })
    }

    /// Select dropdown with the given `(value, label)` options
    pub fn select<I, V, L>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let options = options
            .into_iter()
            .map(|(value, label)| SelectOption::new(value, label))
            .collect();
        Self::with_kind(name, ElementKind::Select { options })
    }

    /// Set the label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.flags.required = true;
        self
    }

    /// Mark as read-only; submitted values are ignored
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.flags.readonly = true;
        self
    }

    /// Set the visible rows of a textarea; no effect on other kinds
    #[must_use]
    pub fn rows(mut self, count: u32) -> Self {
        if let ElementKind::Textarea { rows } = &mut self.kind {
            *rows = count;
        }
        self
    }

    /// Attribute key
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label, defaulting to the humanized name
    #[must_use]
    pub fn label_text(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| helpers::humanize(&self.name))
    }

    /// Kind of element
    #[must_use]
    pub const fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Attribute flags
    #[must_use]
    pub const fn flags(&self) -> ElementFlags {
        self.flags
    }

    /// Dotted view name
    #[must_use]
    pub fn view(&self) -> String {
        format!("form.element.{}", self.kind.as_str())
    }

    /// Render with the current row value and validation errors
    ///
    /// # Errors
    ///
    /// Returns whatever the template reports.
    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
        row: &Value,
        errors: &[String],
    ) -> Result<String, AdminError> {
        let value = extract_value(row, &self.name);
        let mut context = json!({
            "name": self.name,
            "label": self.label_text(),
            "required": self.flags.required,
            "readonly": self.flags.readonly,
            "errors": errors,
            "value": display_value(&value),
        });

        match &self.kind {
            ElementKind::Password => {
                context["value"] = Value::String(String::new());
            }
            ElementKind::Checkbox => {
                context["checked"] = Value::Bool(is_truthy(&value));
            }
            ElementKind::Textarea { rows } => {
                context["rows"] = json!(rows);
            }
            ElementKind::Select { options } => {
                context["options"] = serde_json::to_value(options)?;
            }
            ElementKind::Text => {}
        }

        ctx.template.render(&self.view(), context)
    }

    /// Check a submission, returning the error message if it is rejected
    #[must_use]
    pub fn validate(&self, input: &HashMap<String, String>) -> Option<String> {
        if !self.flags.required || self.flags.readonly {
            return None;
        }

        let missing = match &self.kind {
            ElementKind::Checkbox => !input.get(&self.name).is_some_and(|v| is_checked(v)),
            ElementKind::Select { options } => !input
                .get(&self.name)
                .is_some_and(|v| options.iter().any(|option| &option.value == v)),
            _ => input.get(&self.name).is_none_or(|v| v.trim().is_empty()),
        };

        missing.then(|| format!("The {} field is required.", self.label_text().to_lowercase()))
    }

    /// Convert the submitted value into row data
    ///
    /// `None` means the attribute is left untouched: read-only elements,
    /// blank passwords and absent text fields.
    #[must_use]
    pub fn extract(&self, input: &HashMap<String, String>) -> Option<Value> {
        if self.flags.readonly {
            return None;
        }

        let submitted = input.get(&self.name);
        match &self.kind {
            ElementKind::Checkbox => Some(Value::Bool(submitted.is_some_and(|v| is_checked(v)))),
            ElementKind::Password => submitted
                .filter(|v| !v.is_empty())
                .map(|v| Value::String(v.clone())),
            _ => submitted.map(|v| Value::String(v.clone())),
        }
    }
}

fn display_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::String(_) => value.clone(),
        other => Value::String(other.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => is_checked(s),
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn is_checked(value: &str) -> bool {
    matches!(value, "1" | "on" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::MockTemplate;

    fn input(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_label_defaults_from_name() {
        assert_eq!(FormElement::text("first_name").label_text(), "First name");
        assert_eq!(
            FormElement::text("first_name").label("Given name").label_text(),
            "Given name"
        );
    }

    #[test]
    fn test_required_text_validation() {
        let element = FormElement::text("title").required();
        assert_eq!(
            element.validate(&input(&[("title", "  ")])).as_deref(),
            Some("The title field is required.")
        );
        assert!(element.validate(&input(&[("title", "Hello")])).is_none());
        assert!(element.validate(&input(&[])).is_some());
    }

    #[test]
    fn test_select_rejects_unknown_option() {
        let element = FormElement::select("status", [("draft", "Draft"), ("live", "Live")]).required();
        assert!(element.validate(&input(&[("status", "live")])).is_none());
        assert!(element.validate(&input(&[("status", "deleted")])).is_some());
    }

    #[test]
    fn test_readonly_is_never_extracted() {
        let element = FormElement::text("slug").readonly().required();
        assert!(element.validate(&input(&[])).is_none());
        assert_eq!(element.extract(&input(&[("slug", "x")])), None);
    }

    #[test]
    fn test_checkbox_extraction() {
        let element = FormElement::checkbox("published");
        assert_eq!(element.extract(&input(&[("published", "1")])), Some(json!(true)));
        assert_eq!(element.extract(&input(&[])), Some(json!(false)));
    }

    #[test]
    fn test_blank_password_is_skipped() {
        let element = FormElement::password("password");
        assert_eq!(element.extract(&input(&[("password", "")])), None);
        assert_eq!(
            element.extract(&input(&[("password", "hunter2")])),
            Some(json!("hunter2"))
        );
    }

    #[test]
    fn test_textarea_rows() {
        assert_eq!(
            FormElement::textarea("body").rows(12).kind(),
            &ElementKind::Textarea { rows: 12 }
        );
        assert_eq!(FormElement::text("title").rows(12).kind(), &ElementKind::Text);
    }

    #[test]
    fn test_password_value_is_not_echoed() {
        let mut template = MockTemplate::new();
        template
            .expect_render()
            .withf(|view, context| view == "form.element.password" && context["value"] == "")
            .times(1)
            .returning(|_, _| Ok("<input>".to_string()));

        let ctx = RenderContext::new(&template);
        let html = FormElement::password("password")
            .render(&ctx, &json!({ "password": "secret" }), &[])
            .unwrap();
        assert_eq!(html, "<input>");
    }

    #[test]
    fn test_checkbox_checked_from_row() {
        let mut template = MockTemplate::new();
        template
            .expect_render()
            .withf(|_, context| context["checked"] == true)
            .times(1)
            .returning(|_, _| Ok(String::new()));

        let ctx = RenderContext::new(&template);
        FormElement::checkbox("published")
            .render(&ctx, &json!({ "published": 1 }), &[])
            .unwrap();
    }
}
