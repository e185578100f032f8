//! Table displays, extensions and columns
//!
//! A [`TableDisplay`] lists the records of one model. It owns the
//! [`Columns`] extension and any number of further [`DisplayExtension`]s,
//! which are initialized once before rendering and then rendered in order.
//!
//! ```rust
//! use acton_admin::display::{Column, TableDisplay};
//!
//! let mut display = TableDisplay::table().with_title("Posts");
//! display
//!     .set_columns([Column::named("title"), Column::image("cover")])
//!     .set_html_attribute("data-model", "posts");
//! display.initialize();
//!
//! // title, cover, then the injected control column
//! assert_eq!(display.columns().all().len(), 3);
//! ```

pub mod column;
pub mod extension;
pub mod table;

pub use column::{Column, ColumnHeader, ColumnKind, ColumnPayload, ControlLinks};
pub use extension::{Actions, Columns, DisplayAction, DisplayData, DisplayExtension};
pub use table::TableDisplay;

use crate::routing::ModelLinks;
use crate::template::Template;

/// Collaborators available while rendering a display or form
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// View renderer and asset resolver
    pub template: &'a dyn Template,
    /// Attribute holding the row key
    pub key_name: &'a str,
    /// URLs of the model being rendered, if it is routed
    pub links: Option<&'a ModelLinks>,
    /// Width given to image columns without their own
    pub image_width: &'a str,
}

impl<'a> RenderContext<'a> {
    /// Context with default key name (`id`), no links and `80px` thumbnails
    pub fn new(template: &'a dyn Template) -> Self {
        Self {
            template,
            key_name: "id",
            links: None,
            image_width: "80px",
        }
    }

    /// Attach model links for control columns and create buttons
    #[must_use]
    pub const fn with_links(mut self, links: &'a ModelLinks) -> Self {
        self.links = Some(links);
        self
    }

    /// Use a different row key attribute
    #[must_use]
    pub const fn with_key_name(mut self, key_name: &'a str) -> Self {
        self.key_name = key_name;
        self
    }

    /// Use a different default thumbnail width
    #[must_use]
    pub const fn with_image_width(mut self, image_width: &'a str) -> Self {
        self.image_width = image_width;
        self
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("key_name", &self.key_name)
            .field("links", &self.links)
            .field("image_width", &self.image_width)
            .finish_non_exhaustive()
    }
}
