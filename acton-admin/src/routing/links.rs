//! URLs of a routed model

/// Route URLs of one model, gated by what the model permits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelLinks {
    base: String,
    creatable: bool,
    editable: bool,
    deletable: bool,
}

impl ModelLinks {
    /// Links for `alias` under the normalised route `prefix` (`/admin` or `""`)
    ///
    /// Every action is permitted until restricted.
    pub fn new(prefix: &str, alias: &str) -> Self {
        Self {
            base: format!("{prefix}/{alias}"),
            creatable: true,
            editable: true,
            deletable: true,
        }
    }

    /// Permit or forbid the create link
    #[must_use]
    pub fn creatable(mut self, creatable: bool) -> Self {
        self.creatable = creatable;
        self
    }

    /// Permit or forbid edit links
    #[must_use]
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Permit or forbid delete links
    #[must_use]
    pub fn deletable(mut self, deletable: bool) -> Self {
        self.deletable = deletable;
        self
    }

    /// Listing URL
    #[must_use]
    pub fn display_url(&self) -> String {
        self.base.clone()
    }

    /// Create form URL
    #[must_use]
    pub fn create_url(&self) -> Option<String> {
        self.creatable.then(|| format!("{}/create", self.base))
    }

    /// Edit form URL of record `id`
    #[must_use]
    pub fn edit_url(&self, id: &str) -> Option<String> {
        self.editable.then(|| format!("{}/{id}/edit", self.base))
    }

    /// Delete action URL of record `id`
    #[must_use]
    pub fn delete_url(&self, id: &str) -> Option<String> {
        self.deletable.then(|| format!("{}/{id}/delete", self.base))
    }
}
