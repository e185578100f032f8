//! Configuration management for acton-admin
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `ACTON_ADMIN_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/acton-admin/{service}/config.toml` (user config, XDG)
//! 4. `/etc/acton-admin/{service}/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # config.toml
//! template = "default"
//! bootstrap_directory = "./admin"
//! url_prefix = "admin"
//! middleware = ["trace"]
//!
//! [aliases]
//! "blog::Post" = "articles"
//!
//! [assets]
//! url = "https://cdn.example.com"
//!
//! [display]
//! image_width = "120px"
//! ```
//!
//! # Usage
//!
//! ```rust
//! use acton_admin::config::AdminConfig;
//!
//! let config = AdminConfig::default();
//! assert_eq!(config.url_prefix, "admin");
//! assert_eq!(config.template, "default");
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Public asset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Base URL relative asset paths are resolved against
    pub url: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            url: "/".to_string(),
        }
    }
}

/// Display defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Width given to image columns that do not set their own
    pub image_width: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            image_width: "80px".to_string(),
        }
    }
}

/// Complete acton-admin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Name of the registered template used to render every view
    pub template: String,

    /// Directory holding developer-supplied admin files (`views/` overrides)
    pub bootstrap_directory: PathBuf,

    /// URL prefix all admin routes are mounted under
    pub url_prefix: String,

    /// Named middleware applied to every admin route, outermost last
    pub middleware: Vec<String>,

    /// Model class to alias overrides
    pub aliases: BTreeMap<String, String>,

    /// Public asset settings
    pub assets: AssetSettings,

    /// Display defaults
    pub display: DisplaySettings,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            template: "default".to_string(),
            bootstrap_directory: PathBuf::from("./admin"),
            url_prefix: "admin".to_string(),
            middleware: vec!["trace".to_string()],
            aliases: BTreeMap::new(),
            assets: AssetSettings::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl AdminConfig {
    /// Load configuration for a specific service
    ///
    /// Searches for configuration in XDG-compliant locations with precedence:
    /// 1. Environment variables (`ACTON_ADMIN_*`)
    /// 2. `./config.toml`
    /// 3. `~/.config/acton-admin/{service_name}/config.toml`
    /// 4. `/etc/acton-admin/{service_name}/config.toml`
    /// 5. Defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or a value has the
    /// wrong type.
    pub fn load_for_service(service_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let system_config = PathBuf::from("/etc/acton-admin")
            .join(service_name)
            .join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        let user_config = Self::recommended_path(service_name);
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        figment = figment.merge(Env::prefixed("ACTON_ADMIN_").split("__").lowercase(true));

        Ok(figment.extract()?)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file leaves the defaults in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed.
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .merge(Env::prefixed("ACTON_ADMIN_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path for a service
    #[must_use]
    pub fn recommended_path(service_name: &str) -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| {
                config_dir
                    .join("acton-admin")
                    .join(service_name)
                    .join("config.toml")
            },
        )
    }

    /// URL prefix normalised to a leading slash and no trailing slash
    ///
    /// An empty prefix mounts the admin at the root and yields `""`.
    #[must_use]
    pub fn route_prefix(&self) -> String {
        let trimmed = self.url_prefix.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Directory the default template reads view overrides from
    #[must_use]
    pub fn views_directory(&self) -> PathBuf {
        self.bootstrap_directory.join("views")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AdminConfig::default();
        assert_eq!(config.template, "default");
        assert_eq!(config.url_prefix, "admin");
        assert_eq!(config.middleware, vec!["trace"]);
        assert!(config.aliases.is_empty());
        assert_eq!(config.assets.url, "/");
        assert_eq!(config.display.image_width, "80px");
    }

    #[test]
    fn test_route_prefix_normalisation() {
        let mut config = AdminConfig::default();
        assert_eq!(config.route_prefix(), "/admin");

        config.url_prefix = "/backoffice/".to_string();
        assert_eq!(config.route_prefix(), "/backoffice");

        config.url_prefix = "/".to_string();
        assert_eq!(config.route_prefix(), "");
    }

    #[test]
    fn test_views_directory() {
        let config = AdminConfig::default();
        assert_eq!(config.views_directory(), PathBuf::from("./admin/views"));
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let config = AdminConfig::load_from("/nonexistent/acton-admin.toml").unwrap();
        assert_eq!(config.url_prefix, "admin");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let toml_content = r#"
template = "bootstrap"
url_prefix = "backoffice"
middleware = []

[aliases]
"blog::Post" = "articles"

[assets]
url = "https://cdn.example.com"
"#;
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = AdminConfig::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.template, "bootstrap");
        assert_eq!(config.url_prefix, "backoffice");
        assert!(config.middleware.is_empty());
        assert_eq!(config.aliases.get("blog::Post").map(String::as_str), Some("articles"));
        assert_eq!(config.assets.url, "https://cdn.example.com");
        // Untouched sections keep their defaults
        assert_eq!(config.display.image_width, "80px");
    }

    #[test]
    fn test_recommended_path() {
        let path = AdminConfig::recommended_path("my-admin");
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
