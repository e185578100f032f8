//! Column definitions
//!
//! A [`Column`] describes how one attribute of a row is shown in a table.
//! The variant is an explicit [`ColumnKind`] tag:
//!
//! - [`ColumnKind::Named`] shows the attribute value as text
//! - [`ColumnKind::Image`] shows the attribute as a thumbnail and is never orderable
//! - [`ColumnKind::Control`] is the system column drawing per-row edit/delete controls
//!
//! ```rust
//! use acton_admin::display::Column;
//!
//! let title = Column::named("title").label("Title");
//! let cover = Column::image("cover").image_width("120px");
//! assert!(title.is_orderable());
//! assert!(!cover.is_orderable());
//! ```

use serde::Serialize;
use serde_json::Value;

use super::RenderContext;
use crate::template::helpers;

/// Column variant tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// Plain attribute column
    Named,
    /// Thumbnail column
    Image {
        /// Explicit width; falls back to the configured display default
        image_width: Option<String>,
    },
    /// Row controls column, injected by the columns extension
    Control,
}

impl ColumnKind {
    /// Short name used in render payloads and CSS classes
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Named => "named",
            Self::Image { .. } => "image",
            Self::Control => "control",
        }
    }
}

/// One displayed attribute of a table display
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    label: Option<String>,
    orderable: bool,
    appends: Vec<String>,
    kind: ColumnKind,
    initialized: bool,
}

impl Column {
    fn with_kind(name: impl Into<String>, kind: ColumnKind, orderable: bool) -> Self {
        Self {
            name: name.into(),
            label: None,
            orderable,
            appends: Vec::new(),
            kind,
            initialized: false,
        }
    }

    /// Plain column showing the attribute `name` (dotted paths reach into nested objects)
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_kind(name, ColumnKind::Named, true)
    }

    /// Thumbnail column; relative values are resolved to public asset URLs
    pub fn image(name: impl Into<String>) -> Self {
        Self::with_kind(name, ColumnKind::Image { image_width: None }, false)
    }

    /// Row controls column
    ///
    /// The columns extension appends one of these on initialization; building
    /// one by hand is only needed to customise it through
    /// [`Columns::set_control_column`](super::Columns::set_control_column).
    #[must_use]
    pub fn control() -> Self {
        Self::with_kind("", ColumnKind::Control, false)
    }

    /// Set the header label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Allow or forbid ordering by this column
    ///
    /// Only named columns can be orderable; the flag is ignored for the others.
    #[must_use]
    pub fn orderable(mut self, orderable: bool) -> Self {
        self.orderable = orderable;
        self
    }

    /// Append a raw HTML fragment rendered after the cell value
    #[must_use]
    pub fn append(mut self, fragment: impl Into<String>) -> Self {
        self.appends.push(fragment.into());
        self
    }

    /// Set the thumbnail width of an image column; no effect on other kinds
    #[must_use]
    pub fn image_width(mut self, width: impl Into<String>) -> Self {
        if let ColumnKind::Image { image_width } = &mut self.kind {
            *image_width = Some(width.into());
        }
        self
    }

    /// Attribute key
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header label, empty until set or initialized
    #[must_use]
    pub fn label_text(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    /// Variant tag
    #[must_use]
    pub const fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    /// Whether this is the row controls column
    #[must_use]
    pub const fn is_control(&self) -> bool {
        matches!(self.kind, ColumnKind::Control)
    }

    /// Whether the table may be ordered by this column
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        self.orderable && matches!(self.kind, ColumnKind::Named)
    }

    /// Appended fragments
    #[must_use]
    pub fn appends(&self) -> &[String] {
        &self.appends
    }

    /// Whether [`initialize`](Self::initialize) has run
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Resolve defaults before rendering; repeated calls do nothing
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        if self.label.is_none() && !self.is_control() {
            self.label = Some(helpers::humanize(&self.name));
        }

        self.initialized = true;
    }

    /// Header payload
    #[must_use]
    pub fn header(&self) -> ColumnHeader {
        ColumnHeader {
            kind: self.kind.as_str(),
            name: self.name.clone(),
            label: self.label_text().to_string(),
            orderable: self.is_orderable(),
        }
    }

    /// Cell payload for one row
    #[must_use]
    pub fn to_payload(&self, row: &Value, ctx: &RenderContext<'_>) -> ColumnPayload {
        let mut payload = ColumnPayload {
            kind: self.kind.as_str(),
            name: self.name.clone(),
            label: self.label_text().to_string(),
            value: Value::Null,
            orderable: self.is_orderable(),
            append: self.appends.clone(),
            image_width: None,
            controls: None,
        };

        match &self.kind {
            ColumnKind::Named => {
                payload.value = extract_value(row, &self.name);
            }
            ColumnKind::Image { image_width } => {
                payload.value = image_source(extract_value(row, &self.name), ctx);
                payload.image_width = Some(
                    image_width
                        .clone()
                        .unwrap_or_else(|| ctx.image_width.to_string()),
                );
            }
            ColumnKind::Control => {
                let key = row_key(row, ctx.key_name);
                payload.value = key.clone().map_or(Value::Null, Value::String);
                payload.controls = Some(ControlLinks {
                    edit_url: key
                        .as_deref()
                        .and_then(|id| ctx.links.and_then(|links| links.edit_url(id))),
                    delete_url: key
                        .as_deref()
                        .and_then(|id| ctx.links.and_then(|links| links.delete_url(id))),
                });
            }
        }

        payload
    }
}

/// Table header payload of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHeader {
    /// Variant tag
    pub kind: &'static str,
    /// Attribute key
    pub name: String,
    /// Header label
    pub label: String,
    /// Whether the table may be ordered by this column
    pub orderable: bool,
}

/// Render payload of one cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnPayload {
    /// Variant tag
    pub kind: &'static str,
    /// Attribute key
    pub name: String,
    /// Header label
    pub label: String,
    /// Value extracted from the row
    pub value: Value,
    /// Whether the table may be ordered by this column
    pub orderable: bool,
    /// Raw HTML fragments rendered after the value
    pub append: Vec<String>,
    /// Thumbnail width, image columns only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_width: Option<String>,
    /// Row control links, control columns only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<ControlLinks>,
}

/// Links drawn by the control column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlLinks {
    /// Edit form URL, when the model is editable
    pub edit_url: Option<String>,
    /// Delete action URL, when the model is deletable
    pub delete_url: Option<String>,
}

/// Follow a dotted path (`author.name`, `tags.0`) into a row
#[must_use]
pub fn extract_value(row: &Value, path: &str) -> Value {
    let mut current = row;
    for segment in path.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Value::Null,
        }
    }
    current.clone()
}

/// Primary key of a row as a string
#[must_use]
pub fn row_key(row: &Value, key_name: &str) -> Option<String> {
    match extract_value(row, key_name) {
        Value::String(key) if !key.is_empty() => Some(key),
        Value::Number(key) => Some(key.to_string()),
        _ => None,
    }
}

fn image_source(value: Value, ctx: &RenderContext<'_>) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::String(path) if path.is_empty() || helpers::is_qualified_reference(&path) => {
            Value::String(path)
        }
        Value::String(path) => Value::String(ctx.template.asset(&path)),
        other => other,
    }
}
