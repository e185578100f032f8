//! The columns extension
//!
//! Owns the ordered column list of a table display. Lifecycle:
//!
//! 1. Constructed: columns are freely pushed; controls may be toggled.
//! 2. Initialized (one way, once): each column initializes, then the control
//!    column is appended if controls are active.
//!
//! Disabling controls after initialization strips every control column
//! from the list right away. Before initialization it only clears the flag.

use serde::Serialize;

use super::{DisplayData, DisplayExtension};
use crate::display::column::{row_key, Column, ColumnHeader, ColumnPayload};
use crate::display::RenderContext;
use crate::error::AdminError;

/// Dotted name of the view the columns table is rendered with
pub const DEFAULT_VIEW: &str = "display.extensions.columns";

/// Ordered column collection of a table display
#[derive(Debug, Clone)]
pub struct Columns {
    columns: Vec<Column>,
    control_active: bool,
    control_column: Column,
    view: String,
    initialized: bool,
}

impl Default for Columns {
    fn default() -> Self {
        Self::new()
    }
}

impl Columns {
    /// Empty collection with controls enabled
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            control_active: true,
            control_column: Column::control(),
            view: DEFAULT_VIEW.to_string(),
            initialized: false,
        }
    }

    /// Replace the column injected on initialization
    ///
    /// Pass a [`Column::control`]; only control-kind columns are removed by
    /// [`disable_controls`](Self::disable_controls).
    pub fn set_control_column(&mut self, column: Column) -> &mut Self {
        self.control_column = column;
        self
    }

    /// Column injected on initialization
    #[must_use]
    pub const fn control_column(&self) -> &Column {
        &self.control_column
    }

    /// Whether the control column will be (or was) injected
    #[must_use]
    pub const fn is_control_active(&self) -> bool {
        self.control_active
    }

    /// Request the control column
    ///
    /// Takes effect at initialization; enabling afterwards does not inject it.
    pub fn enable_controls(&mut self) -> &mut Self {
        self.control_active = true;
        self
    }

    /// Drop the control column
    ///
    /// Once initialized, every control-kind column is removed from the list
    /// immediately, including any pushed by hand.
    pub fn disable_controls(&mut self) -> &mut Self {
        self.control_active = false;

        if self.initialized {
            self.columns.retain(|column| !column.is_control());
        }

        self
    }

    /// Live ordered column list
    #[must_use]
    pub fn all(&self) -> &[Column] {
        &self.columns
    }

    /// Append a column
    ///
    /// Names are not checked for uniqueness; duplicates render twice.
    pub fn push(&mut self, column: Column) -> &mut Self {
        self.columns.push(column);
        self
    }

    /// Append each column in order
    pub fn set<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = Column>,
    {
        for column in columns {
            self.push(column);
        }
        self
    }

    /// Dotted view name used by [`render`](DisplayExtension::render)
    #[must_use]
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Render with a different view
    pub fn set_view(&mut self, view: impl Into<String>) -> &mut Self {
        self.view = view.into();
        self
    }

    /// Build the payload handed to the view
    #[must_use]
    pub fn to_payload(&self, ctx: &RenderContext<'_>, data: &DisplayData<'_>) -> ColumnsPayload {
        ColumnsPayload {
            columns: self.columns.iter().map(Column::header).collect(),
            attributes: data.attributes.to_string(),
            collection: data
                .collection
                .iter()
                .map(|row| RowPayload {
                    key: row_key(row, ctx.key_name),
                    cells: self
                        .columns
                        .iter()
                        .map(|column| column.to_payload(row, ctx))
                        .collect(),
                })
                .collect(),
        }
    }
}

impl DisplayExtension for Columns {
    fn name(&self) -> &str {
        "columns"
    }

    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        for column in &mut self.columns {
            column.initialize();
        }

        if self.control_active {
            let mut control = self.control_column.clone();
            control.initialize();
            self.columns.push(control);
        }

        self.initialized = true;
        tracing::trace!(columns = self.columns.len(), "Columns initialized");
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn render(&self, ctx: &RenderContext<'_>, data: &DisplayData<'_>) -> Result<String, AdminError> {
        let payload = serde_json::to_value(self.to_payload(ctx, data))?;
        ctx.template.render(&self.view, payload)
    }
}

/// Payload of the columns view
#[derive(Debug, Clone, Serialize)]
pub struct ColumnsPayload {
    /// Header of every active column, in display order
    pub columns: Vec<ColumnHeader>,
    /// The display's html attributes
    pub attributes: String,
    /// One entry per row
    pub collection: Vec<RowPayload>,
}

/// Cells of one row
#[derive(Debug, Clone, Serialize)]
pub struct RowPayload {
    /// Row key, if the row has one
    pub key: Option<String>,
    /// One cell per active column, in display order
    pub cells: Vec<ColumnPayload>,
}
