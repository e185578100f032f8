//! Pluggable display extensions
//!
//! An extension contributes one fragment to a table display. The display
//! initializes every extension once, columns first, then renders them in the
//! order they were attached.

mod actions;
mod columns;

pub use actions::{Actions, DisplayAction};
pub use columns::Columns;

use serde_json::Value;

use super::RenderContext;
use crate::error::AdminError;

/// Display state handed to extensions while rendering
#[derive(Debug, Clone, Copy)]
pub struct DisplayData<'a> {
    /// The display's html attributes, already rendered as `k="v"` pairs
    pub attributes: &'a str,
    /// Rows being listed
    pub collection: &'a [Value],
}

/// A unit of behaviour attached to a [`TableDisplay`](super::TableDisplay)
pub trait DisplayExtension: Send + Sync {
    /// Short identifying name
    fn name(&self) -> &str;

    /// Prepare for rendering; must tolerate repeated calls
    fn initialize(&mut self);

    /// Whether [`initialize`](Self::initialize) has run
    fn is_initialized(&self) -> bool;

    /// Render this extension's fragment
    ///
    /// # Errors
    ///
    /// Returns whatever the template reports while rendering.
    fn render(&self, ctx: &RenderContext<'_>, data: &DisplayData<'_>) -> Result<String, AdminError>;
}
