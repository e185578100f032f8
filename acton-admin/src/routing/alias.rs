//! The alias map
//!
//! Maps URL aliases onto model classes and back. The map is built once at
//! boot and read-only afterwards. Its [`pattern`](AliasMap::pattern) is the
//! alternation of every registered alias and is the only thing the model
//! segment of a route may match.

use std::collections::HashMap;

use regex::Regex;

use crate::error::AdminError;

/// Whether `segment` only holds `[A-Za-z0-9_-]` and is not empty
#[must_use]
pub fn is_route_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Two-way alias to model class map
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
    order: Vec<String>,
    matcher: Option<Regex>,
}

impl AliasMap {
    /// Empty map; matches no segment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(alias, class)` pairs, in order
    ///
    /// # Errors
    ///
    /// See [`insert`](Self::insert).
    pub fn from_pairs<I, A, C>(pairs: I) -> Result<Self, AdminError>
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        let mut map = Self::new();
        for (alias, class) in pairs {
            map.insert(alias, class)?;
        }
        Ok(map)
    }

    /// Register an alias for a class
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Config`] if the alias holds characters other
    /// than `[A-Za-z0-9_-]`, or if the alias or the class is already mapped.
    pub fn insert(
        &mut self,
        alias: impl Into<String>,
        class: impl Into<String>,
    ) -> Result<(), AdminError> {
        let alias = alias.into();
        let class = class.into();

        if !is_route_segment(&alias) {
            return Err(AdminError::Config(format!(
                "Alias [{alias}] of [{class}] must match [A-Za-z0-9_-]+"
            )));
        }
        if let Some(existing) = self.forward.get(&alias) {
            return Err(AdminError::Config(format!(
                "Alias [{alias}] is used by both [{existing}] and [{class}]"
            )));
        }
        if let Some(existing) = self.reverse.get(&class) {
            return Err(AdminError::Config(format!(
                "Model [{class}] is already registered as [{existing}]"
            )));
        }

        self.forward.insert(alias.clone(), class.clone());
        self.reverse.insert(class, alias.clone());
        self.order.push(alias);
        self.matcher = Some(
            Regex::new(&format!("^(?:{})$", self.pattern()))
                .map_err(|e| AdminError::Config(format!("Invalid alias pattern: {e}")))?,
        );

        Ok(())
    }

    /// Alternation of every alias, in registration order
    #[must_use]
    pub fn pattern(&self) -> String {
        self.order
            .iter()
            .map(|alias| regex::escape(alias))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Whether a path segment is exactly one of the registered aliases
    #[must_use]
    pub fn matches(&self, segment: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(segment))
    }

    /// Forward lookup: alias to class
    #[must_use]
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.forward.get(alias).map(String::as_str)
    }

    /// Reverse lookup: class to alias
    #[must_use]
    pub fn alias_for(&self, class: &str) -> Option<&str> {
        self.reverse.get(class).map(String::as_str)
    }

    /// Aliases in registration order
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of aliases
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no alias is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
