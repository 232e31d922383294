//! Gallery configuration
//!
//! Read from a `studio.toml` file or built in code:
//!
//! ```toml
//! container_id = "27205657"
//! shuffle = true
//! theme = "dark"
//! placeholders_per_page = 9
//! lazy_margin = 100.0
//! ```
//!
//! Every field except `container_id` has a default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use studio_listing::{UrlTemplate, DEFAULT_ITEM_URL, DEFAULT_LISTING_URL, DEFAULT_THUMBNAIL_URL};

use crate::error::ConfigError;

/// Gallery configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewConfig {
    /// Identifier of the remote collection to page through
    #[serde(default)]
    pub container_id: String,

    /// Present each page's records in random order
    #[serde(default)]
    pub shuffle: bool,

    /// Fixed seed for the shuffle; seeded from the OS when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_seed: Option<u64>,

    /// Written to the root's `data-theme` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Placeholders pre-allocated before each page request
    #[serde(default = "default_placeholders_per_page")]
    pub placeholders_per_page: usize,

    /// Distance in pixels outside the viewport at which images start loading
    #[serde(default = "default_lazy_margin")]
    pub lazy_margin: f32,

    #[serde(default = "default_listing_url")]
    pub listing_url: UrlTemplate,

    #[serde(default = "default_thumbnail_url")]
    pub thumbnail_url: UrlTemplate,

    #[serde(default = "default_item_url")]
    pub item_url: UrlTemplate,

    /// `target` attribute of item links
    #[serde(default = "default_link_target")]
    pub link_target: String,

    /// Text of the element shown when a page fails to load
    #[serde(default = "default_error_message")]
    pub error_message: String,
}

fn default_placeholders_per_page() -> usize {
    9
}

fn default_lazy_margin() -> f32 {
    100.0
}

fn default_listing_url() -> UrlTemplate {
    UrlTemplate::new(DEFAULT_LISTING_URL)
}

fn default_thumbnail_url() -> UrlTemplate {
    UrlTemplate::new(DEFAULT_THUMBNAIL_URL)
}

fn default_item_url() -> UrlTemplate {
    UrlTemplate::new(DEFAULT_ITEM_URL)
}

fn default_link_target() -> String {
    "_blank".to_string()
}

fn default_error_message() -> String {
    "There was an error loading the next page of projects.".to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl ViewConfig {
    /// Default configuration for `container_id`
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            shuffle: false,
            shuffle_seed: None,
            theme: None,
            placeholders_per_page: default_placeholders_per_page(),
            lazy_margin: default_lazy_margin(),
            listing_url: default_listing_url(),
            thumbnail_url: default_thumbnail_url(),
            item_url: default_item_url(),
            link_target: default_link_target(),
            error_message: default_error_message(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_placeholders_per_page(mut self, count: usize) -> Self {
        self.placeholders_per_page = count;
        self
    }

    pub fn with_lazy_margin(mut self, margin: f32) -> Self {
        self.lazy_margin = margin;
        self
    }

    pub fn with_listing_url(mut self, template: impl Into<UrlTemplate>) -> Self {
        self.listing_url = template.into();
        self
    }

    pub fn with_thumbnail_url(mut self, template: impl Into<UrlTemplate>) -> Self {
        self.thumbnail_url = template.into();
        self
    }

    pub fn with_item_url(mut self, template: impl Into<UrlTemplate>) -> Self {
        self.item_url = template.into();
        self
    }

    pub fn with_link_target(mut self, target: impl Into<String>) -> Self {
        self.link_target = target.into();
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.container_id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "container_id",
                reason: "must not be empty".to_string(),
            });
        }

        for (field, template) in [
            ("listing_url", &self.listing_url),
            ("thumbnail_url", &self.thumbnail_url),
            ("item_url", &self.item_url),
        ] {
            if !template.has_placeholder("id") {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("`{template}` has no {{id}} placeholder"),
                });
            }
        }

        if !self.listing_url.has_placeholder("page") {
            return Err(ConfigError::Invalid {
                field: "listing_url",
                reason: format!("`{}` has no {{page}} placeholder", self.listing_url),
            });
        }

        if !self.lazy_margin.is_finite() || self.lazy_margin < 0.0 {
            return Err(ConfigError::Invalid {
                field: "lazy_margin",
                reason: format!("{} is not a non-negative distance", self.lazy_margin),
            });
        }

        Ok(())
    }
}
