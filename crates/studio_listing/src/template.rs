//! URL templates with `{id}` and `{page}` placeholders

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default listing endpoint, one HTML fragment per page
pub const DEFAULT_LISTING_URL: &str = "https://scratch.mit.edu/site-api/projects/in/{id}/{page}/";
/// Default thumbnail location for an item
pub const DEFAULT_THUMBNAIL_URL: &str =
    "https://cdn2.scratch.mit.edu/get_image/project/{id}_144x108.png";
/// Default link target for an item card
pub const DEFAULT_ITEM_URL: &str = "https://scratch.mit.edu/projects/{id}/";

/// A URL with `{id}` and `{page}` placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the template mentions `{name}`
    pub fn has_placeholder(&self, name: &str) -> bool {
        self.0.contains(&format!("{{{name}}}"))
    }

    /// Substitute an item or container id
    pub fn expand_id(&self, id: &str) -> String {
        self.0.replace("{id}", id)
    }

    /// Substitute both a container id and a page number
    pub fn expand(&self, id: &str, page: u32) -> String {
        self.expand_id(id).replace("{page}", &page.to_string())
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UrlTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}
