//! # Dashboard configuration: `dashboard.toml`
//!
//! Defines the TOML file that the web binary embeds at build time
//! (filename: [`DashboardConfig::filename`] = `"dashboard.toml"`). It tells the
//! dashboard where the remote API lives and how list views paginate and search.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://bkmaferyogurt-production.up.railway.app/api"
//!
//! [listing]
//! page_size = 9                 # rows per page in list views
//! search_scope = "collection"   # or "page" to search only the visible page
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`DashboardConfig`] | Top-level config. Builder helpers, TOML (de)serialisation, env override. |
//! | [`ApiConfig`] | Base URL of the remote REST API. |
//! | [`ListingConfig`] | Page size and [`SearchScope`] for list views. |
//!
//! All structs derive or implement `Default` so that a missing or empty config
//! file is equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_API_BASE_URL: &str = "https://bkmaferyogurt-production.up.railway.app/api";

/// Rows per page in list views.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Top-level configuration stored in `dashboard.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

/// Remote API configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin plus path prefix; endpoint paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Which rows a list-view search looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Filter the whole fetched collection, then paginate the matches.
    #[default]
    Collection,
    /// Filter only the rows of the current page.
    Page,
}

/// List view configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub search_scope: SearchScope,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_scope: SearchScope::default(),
        }
    }
}

impl DashboardConfig {
    /// Create a config pointing at the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
            },
            listing: ListingConfig::default(),
        }
    }

    /// Builder method to set the list page size. Zero is clamped to one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.listing.page_size = page_size.max(1);
        self
    }

    /// Builder method to set the search scope.
    pub fn with_search_scope(mut self, scope: SearchScope) -> Self {
        self.listing.search_scope = scope;
        self
    }

    /// Replace the base URL when `url` is set and non-blank.
    pub fn with_base_url_override(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api.base_url = url.to_string();
        }
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "dashboard.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.listing.page_size = config.listing.page_size.max(1);
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parse embedded TOML, falling back to defaults on a malformed file.
    pub fn load(embedded: &str, base_url_override: Option<&str>) -> Self {
        let config = match Self::from_toml(embedded) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Invalid {}: {}", Self::filename(), e);
                Self::default()
            }
        };
        config.with_base_url_override(base_url_override)
    }
}
