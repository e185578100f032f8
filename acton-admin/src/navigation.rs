//! Admin navigation menu

use serde::Serialize;

/// One menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Link text
    pub title: String,
    /// Target URL
    pub url: String,
    /// CSS icon class
    pub icon: Option<String>,
    /// Lower sorts first
    pub priority: i32,
}

impl Page {
    /// Entry with priority 0 and no icon
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            icon: None,
            priority: 0,
        }
    }

    /// Set the icon class
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the sort priority
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Menu pages ordered by priority, then insertion order
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    pages: Vec<Page>,
}

impl Navigation {
    /// Empty menu
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a page, keeping the order
    pub fn add(&mut self, page: Page) -> &mut Self {
        let at = self
            .pages
            .partition_point(|existing| existing.priority <= page.priority);
        self.pages.insert(at, page);
        self
    }

    /// Pages in menu order
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Whether the menu is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl FromIterator<Page> for Navigation {
    fn from_iter<I: IntoIterator<Item = Page>>(iter: I) -> Self {
        let mut navigation = Self::new();
        for page in iter {
            navigation.add(page);
        }
        navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_priority_then_insertion_order() {
        let navigation: Navigation = [
            Page::new("Posts", "/admin/posts"),
            Page::new("Settings", "/admin/settings").priority(10),
            Page::new("Tags", "/admin/tags"),
            Page::new("Home", "/").priority(-1).icon("fa fa-home"),
        ]
        .into_iter()
        .collect();

        let titles = navigation
            .pages()
            .iter()
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Home", "Posts", "Tags", "Settings"]);
        assert_eq!(navigation.pages()[0].icon.as_deref(), Some("fa fa-home"));
    }

    proptest! {
        #[test]
        fn prop_pages_sorted_and_stable(priorities in prop::collection::vec(-5i32..5, 0..24)) {
            let navigation: Navigation = priorities
                .iter()
                .enumerate()
                .map(|(i, p)| Page::new(i.to_string(), format!("/{i}")).priority(*p))
                .collect();

            let mut expected = priorities.iter().copied().enumerate().collect::<Vec<_>>();
            expected.sort_by_key(|(_, p)| *p);

            let actual = navigation
                .pages()
                .iter()
                .map(|page| (page.title.parse::<usize>().unwrap(), page.priority))
                .collect::<Vec<_>>();
            prop_assert_eq!(actual, expected);
        }
    }
}
