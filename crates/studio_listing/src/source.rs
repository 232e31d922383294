//! Where listing documents come from

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::{Result, TransportError};

/// A remote (or not so remote) listing endpoint
///
/// Implementations hand back the raw document for one page; scraping is
/// the caller's job. There is no retry and no caching at this layer.
#[allow(async_fn_in_trait)]
pub trait ListingSource {
    /// Fetch the document for `page` of `container_id`
    async fn fetch_page(&self, container_id: &str, page: u32) -> Result<String>;
}

// ============================================================================
// Directory source
// ============================================================================

/// Reads saved listing documents from `<root>/<container>/<page>.html`
#[derive(Debug, Clone)]
pub struct DirectoryListingSource {
    root: PathBuf,
}

impl DirectoryListingSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn page_path(&self, container_id: &str, page: u32) -> PathBuf {
        self.root.join(container_id).join(format!("{page}.html"))
    }
}

impl ListingSource for DirectoryListingSource {
    async fn fetch_page(&self, container_id: &str, page: u32) -> Result<String> {
        let path = self.page_path(container_id, page);
        tracing::debug!("Reading listing page {}", path.display());
        match std::fs::read_to_string(&path) {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TransportError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(TransportError::Io(e)),
        }
    }
}

// ============================================================================
// In-memory source
// ============================================================================

/// Serves fixed documents from memory
///
/// Pages registered with [`fail_page`](Self::fail_page) answer with a
/// network error. Every call is counted, which lets callers assert that no
/// request was issued.
#[derive(Debug, Default)]
pub struct MemoryListingSource {
    pages: BTreeMap<u32, String>,
    failing: BTreeSet<u32>,
    requests: Cell<usize>,
}

impl MemoryListingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, document: impl Into<String>) -> Self {
        self.pages.insert(page, document.into());
        self
    }

    pub fn fail_page(mut self, page: u32) -> Self {
        self.failing.insert(page);
        self
    }

    /// Number of fetches issued so far
    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl ListingSource for MemoryListingSource {
    async fn fetch_page(&self, container_id: &str, page: u32) -> Result<String> {
        self.requests.set(self.requests.get() + 1);
        if self.failing.contains(&page) {
            return Err(TransportError::Network(format!(
                "connection reset fetching {container_id} page {page}"
            )));
        }
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| TransportError::NotFound(format!("{container_id} page {page}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_counts_requests() {
        let source = MemoryListingSource::new()
            .with_page(1, "<p>one</p>")
            .fail_page(2);

        assert_eq!(
            pollster::block_on(source.fetch_page("c", 1)).unwrap(),
            "<p>one</p>"
        );
        assert!(matches!(
            pollster::block_on(source.fetch_page("c", 2)),
            Err(TransportError::Network(_))
        ));
        assert!(matches!(
            pollster::block_on(source.fetch_page("c", 3)),
            Err(TransportError::NotFound(_))
        ));
        assert_eq!(source.requests(), 3);
    }

    #[test]
    fn test_directory_page_path() {
        let source = DirectoryListingSource::new("/srv/listings");
        assert_eq!(
            source.page_path("42", 3),
            PathBuf::from("/srv/listings/42/3.html")
        );
    }

    #[test]
    fn test_directory_missing_page_is_not_found() {
        let source = DirectoryListingSource::new(env!("CARGO_MANIFEST_DIR"));
        let result = pollster::block_on(source.fetch_page("no-such-container", 1));
        assert!(matches!(result, Err(TransportError::NotFound(_))));
    }
}
