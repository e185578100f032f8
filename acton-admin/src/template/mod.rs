//! View rendering and asset resolution
//!
//! Everything the admin draws goes through a [`Template`]: the columns
//! extension, the table display, forms and the page layout all hand a view
//! name and a JSON context to it. Views are named with dots
//! (`display.extensions.columns`); a template maps the dotted name onto its
//! own namespace with [`Template::view_path`].
//!
//! The template is chosen by name at boot from a [`TemplateRegistry`]. An
//! unknown name aborts the boot.

pub mod default;
pub mod helpers;
pub mod registry;

pub use default::DefaultTemplate;
pub use registry::{TemplateFactory, TemplateRegistry};

use crate::error::AdminError;

/// Rendering collaborator passed to displays, columns and forms
#[cfg_attr(test, mockall::automock)]
pub trait Template: Send + Sync {
    /// Registry name, also the view namespace
    fn name(&self) -> &str;

    /// Map a dotted view name onto a template path
    fn view_path(&self, view: &str) -> String;

    /// Render the view with the given context
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Render`] if the view is unknown or fails to render.
    fn render(&self, view: &str, context: serde_json::Value) -> Result<String, AdminError>;

    /// Resolve a relative asset path to a public URL
    fn asset(&self, path: &str) -> String;
}

/// Namespace a dotted view name as `{namespace}/{a/b/c}.html`
#[must_use]
pub fn namespaced_view_path(namespace: &str, view: &str) -> String {
    format!("{namespace}/{}.html", view.replace('.', "/"))
}
