//! View helper functions
//!
//! Small string helpers shared by the template, columns and forms.
//!
//! ```rust
//! use acton_admin::template::helpers::asset;
//!
//! assert_eq!(asset("/", "photos/a.png"), "/photos/a.png");
//! assert_eq!(asset("https://cdn.example.com/", "/a.png"), "https://cdn.example.com/a.png");
//! ```

// =============================================================================
// Asset Helpers
// =============================================================================

/// Resolve a relative asset path against the public asset base URL
#[must_use]
pub fn asset(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Whether a value is already a fully qualified reference (`scheme://...`)
#[must_use]
pub fn is_qualified_reference(value: &str) -> bool {
    value.contains("://")
}

// =============================================================================
// Attribute Helpers
// =============================================================================

/// Render `key="value"` pairs separated by spaces with escaped values
///
/// Pairs are emitted in iteration order; pass a sorted map for stable output.
#[must_use]
pub fn html_attributes<'a, I>(attributes: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    attributes
        .into_iter()
        .map(|(key, value)| format!(r#"{}="{}""#, escape_html(key), escape_html(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for element content and quoted attribute values
///
/// URLs pass through with their slashes intact.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// Label Helpers
// =============================================================================

/// Turn an attribute key into a display label
///
/// `created_at` becomes `Created at`, `author.name` becomes `Author name`.
#[must_use]
pub fn humanize(name: &str) -> String {
    let words = name
        .split(['_', '.', '-'])
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = words.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
