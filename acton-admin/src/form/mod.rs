//! Create and edit forms
//!
//! A [`FormDefinition`] is an ordered list of [`FormElement`]s. It renders
//! the create and edit pages, validates submissions and turns them into row
//! attributes for the repository.
//!
//! ```rust
//! use acton_admin::form::{FormDefinition, FormElement};
//! use std::collections::HashMap;
//!
//! let form = FormDefinition::new()
//!     .element(FormElement::text("title").required())
//!     .element(FormElement::checkbox("published"));
//!
//! let input = HashMap::from([("title".to_string(), "Hello".to_string())]);
//! assert!(form.validate(&input).is_ok());
//! assert_eq!(form.extract(&input)["published"], false);
//! ```

mod element;

pub use element::{ElementFlags, ElementKind, FormElement, SelectOption};

use std::collections::{BTreeMap, HashMap};

use serde_json::{json, Map, Value};

use crate::display::RenderContext;
use crate::error::AdminError;
use crate::routing::ModelLinks;

/// Validation messages keyed by element name
pub type FormErrors = BTreeMap<String, Vec<String>>;

/// Ordered form of a model
#[derive(Debug, Clone)]
pub struct FormDefinition {
    elements: Vec<FormElement>,
    title: Option<String>,
    view: String,
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl FormDefinition {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            title: None,
            view: "form.default".to_string(),
        }
    }

    /// Set the heading
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append an element
    #[must_use]
    pub fn element(mut self, element: FormElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Append an element
    pub fn push(&mut self, element: FormElement) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// Elements in display order
    #[must_use]
    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    /// Heading, if any
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Render the form for `row`, posting to `action`
    ///
    /// # Errors
    ///
    /// Returns the first render error raised by an element or the form view.
    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
        row: &Value,
        action: &str,
        errors: &FormErrors,
    ) -> Result<String, AdminError> {
        let elements = self
            .elements
            .iter()
            .map(|element| {
                let messages = errors
                    .get(element.name())
                    .map_or(&[][..], Vec::as_slice);
                element.render(ctx, row, messages)
            })
            .collect::<Result<Vec<_>, _>>()?;

        ctx.template.render(
            &self.view,
            json!({
                "title": self.title,
                "action": action,
                "elements": elements,
                "back_url": ctx.links.map(ModelLinks::display_url),
            }),
        )
    }

    /// Check every element against a submission
    ///
    /// # Errors
    ///
    /// Returns the messages of every rejected element.
    pub fn validate(&self, input: &HashMap<String, String>) -> Result<(), FormErrors> {
        let errors: FormErrors = self
            .elements
            .iter()
            .filter_map(|element| {
                element
                    .validate(input)
                    .map(|message| (element.name().to_string(), vec![message]))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Row attributes carried by a submission
    #[must_use]
    pub fn extract(&self, input: &HashMap<String, String>) -> Map<String, Value> {
        self.elements
            .iter()
            .filter_map(|element| {
                element
                    .extract(input)
                    .map(|value| (element.name().to_string(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::MockTemplate;

    fn post_form() -> FormDefinition {
        FormDefinition::new()
            .with_title("Post")
            .element(FormElement::text("title").required())
            .element(FormElement::textarea("body"))
            .element(FormElement::checkbox("published"))
    }

    #[test]
    fn test_validate_collects_every_error() {
        let form = FormDefinition::new()
            .element(FormElement::text("title").required())
            .element(FormElement::text("slug").required());

        let errors = form.validate(&HashMap::new()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["slug"], vec!["The slug field is required."]);
    }

    #[test]
    fn test_extract_skips_absent_text() {
        let input = HashMap::from([("title".to_string(), "Hello".to_string())]);
        let attributes = post_form().extract(&input);

        assert_eq!(attributes["title"], "Hello");
        assert_eq!(attributes["published"], false);
        assert!(!attributes.contains_key("body"));
    }

    #[test]
    fn test_render_places_errors_and_links() {
        let mut template = MockTemplate::new();
        template
            .expect_render()
            .withf(|view, context| {
                view == "form.element.text" && context["errors"][0] == "The title field is required."
            })
            .times(1)
            .returning(|_, _| Ok("<title/>".to_string()));
        template
            .expect_render()
            .withf(|view, context| {
                view.starts_with("form.element.")
                    && view != "form.element.text"
                    && context["errors"] == json!([])
            })
            .times(2)
            .returning(|view, _| Ok(format!("<{view}/>")));
        template
            .expect_render()
            .withf(|view, context| {
                view == "form.default"
                    && context["action"] == "/admin/posts/create"
                    && context["back_url"] == "/admin/posts"
                    && context["elements"].as_array().map(Vec::len) == Some(3)
            })
            .times(1)
            .returning(|_, _| Ok("<form/>".to_string()));

        let links = ModelLinks::new("/admin", "posts");
        let ctx = RenderContext::new(&template).with_links(&links);
        let errors = post_form().validate(&HashMap::new()).unwrap_err();

        let html = post_form()
            .render(&ctx, &Value::Null, "/admin/posts/create", &errors)
            .unwrap();
        assert_eq!(html, "<form/>");
    }
}
