//! The table display

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{json, Value};

use super::extension::{Columns, DisplayData, DisplayExtension};
use super::{Column, RenderContext};
use crate::error::AdminError;
use crate::template::helpers;

/// Lists the records of one model as a table
///
/// The columns extension is always present and always initialized first.
/// Further extensions are initialized and rendered in attachment order.
pub struct TableDisplay {
    columns: Columns,
    extensions: Vec<Box<dyn DisplayExtension>>,
    html_attributes: BTreeMap<String, String>,
    title: Option<String>,
    view: String,
    initialized: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::table()
    }
}

impl TableDisplay {
    /// Empty table with the default `table table-striped` class
    #[must_use]
    pub fn table() -> Self {
        let mut html_attributes = BTreeMap::new();
        html_attributes.insert("class".to_string(), "table table-striped".to_string());

        Self {
            columns: Columns::new(),
            extensions: Vec::new(),
            html_attributes,
            title: None,
            view: "display.table".to_string(),
            initialized: false,
        }
    }

    /// Set the heading
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append columns
    #[must_use]
    pub fn with_columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        self.columns.set(columns);
        self
    }

    /// Attach an extension
    #[must_use]
    pub fn with_extension(mut self, extension: impl DisplayExtension + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Set an attribute on the `<table>` element
    #[must_use]
    pub fn with_html_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.html_attributes.insert(name.into(), value.into());
        self
    }

    /// Append columns, returning the display for further chaining
    pub fn set_columns<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = Column>,
    {
        self.columns.set(columns);
        self
    }

    /// Set an attribute on the `<table>` element
    pub fn set_html_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.html_attributes.insert(name.into(), value.into());
        self
    }

    /// Attach an extension
    pub fn extend(&mut self, extension: Box<dyn DisplayExtension>) -> &mut Self {
        self.extensions.push(extension);
        self
    }

    /// The columns extension
    #[must_use]
    pub const fn columns(&self) -> &Columns {
        &self.columns
    }

    /// The columns extension, for toggling controls or pushing columns
    pub fn columns_mut(&mut self) -> &mut Columns {
        &mut self.columns
    }

    /// Extensions besides the columns, in attachment order
    pub fn extensions(&self) -> impl Iterator<Item = &dyn DisplayExtension> {
        self.extensions.iter().map(|extension| &**extension)
    }

    /// Heading, if any
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Attributes rendered as `name="value"` pairs, sorted by name
    #[must_use]
    pub fn html_attributes_to_string(&self) -> String {
        helpers::html_attributes(self.html_attributes.iter())
    }

    /// Whether [`initialize`](Self::initialize) has run
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Initialize the columns, then every extension; repeated calls do nothing
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.columns.initialize();
        for extension in &mut self.extensions {
            extension.initialize();
        }

        self.initialized = true;
    }

    /// Render the table for `rows`
    ///
    /// Initializes first if that has not happened yet.
    ///
    /// # Errors
    ///
    /// Returns the first render error raised by an extension or the table view.
    pub fn render(&mut self, ctx: &RenderContext<'_>, rows: &[Value]) -> Result<String, AdminError> {
        self.initialize();

        let attributes = self.html_attributes_to_string();
        let data = DisplayData {
            attributes: &attributes,
            collection: rows,
        };

        let extensions = self
            .extensions
            .iter()
            .map(|extension| extension.render(ctx, &data))
            .filter(|fragment| !matches!(fragment, Ok(html) if html.is_empty()))
            .collect::<Result<Vec<_>, _>>()?;
        let columns = self.columns.render(ctx, &data)?;

        ctx.template.render(
            &self.view,
            json!({
                "title": self.title,
                "create_url": ctx.links.and_then(crate::routing::ModelLinks::create_url),
                "extensions": extensions,
                "columns": columns,
            }),
        )
    }
}

impl fmt::Debug for TableDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableDisplay")
            .field("title", &self.title)
            .field("columns", &self.columns)
            .field(
                "extensions",
                &self.extensions.iter().map(|e| e.name()).collect::<Vec<_>>(),
            )
            .field("html_attributes", &self.html_attributes)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}
