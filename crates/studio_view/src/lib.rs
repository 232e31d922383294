//! Studioview Gallery
//!
//! An incrementally loaded gallery of listing items: pages arrive as the
//! user scrolls, placeholders hold their place while a page is in flight,
//! and thumbnails load only once they come near the viewport.
//!
//! # Architecture
//!
//! - [`StudioView`] - The controller: paging state machine, rendering, and
//!   input routing. Performs no I/O of its own
//! - [`TombstonePool`] - Placeholder cards waiting for a record
//! - [`LazyImageLoader`] - Images whose source is assigned on intersection
//! - [`is_visible`] - The scroll trigger's on-screen check
//! - [`shuffle`] - Uniform random order for a page's records
//! - [`Listeners`] - Host callbacks for selection, page, and end events
//!
//! The view is generic over [`studio_platform::Document`], so the same
//! controller runs against a browser DOM and the headless test document.
//!
//! # Example
//!
//! ```
//! use studio_listing::MemoryListingSource;
//! use studio_platform::Document;
//! use studio_platform_headless::MemoryDocument;
//! use studio_view::{LoadOutcome, StudioView, ViewConfig};
//!
//! let page = r#"<li class="project" data-id="1">
//!                 <span class="title">Pong</span>
//!                 <span class="owner">by <a>ada</a></span>
//!               </li>"#;
//! let source = MemoryListingSource::new().with_page(1, page);
//!
//! let mut dom = MemoryDocument::new(800.0, 600.0);
//! let body = dom.body();
//! let mut view = StudioView::new(dom, ViewConfig::new("27205657")).unwrap();
//! let root = *view.root();
//! view.dom_mut().append_child(&body, &root);
//!
//! let outcome = pollster::block_on(view.load_next_page(&source)).unwrap();
//! assert_eq!(outcome, LoadOutcome::Ended { page: 1, items: 1 });
//! assert_eq!(view.populated_cards(), 1);
//! ```

pub mod config;
pub mod error;
pub mod lazy_image;
pub mod listener;
pub mod markup;
pub mod shuffle;
pub mod state;
pub mod tombstone;
pub mod view;
pub mod visibility;

pub use config::ViewConfig;
pub use error::{ConfigError, Result, ViewError};
pub use lazy_image::LazyImageLoader;
pub use listener::{Listeners, SubscriptionId, ViewEvent};
pub use shuffle::shuffle;
pub use state::{LoadEvent, LoadState, PaginationState};
pub use tombstone::{Tombstone, TombstonePool};
pub use view::{EventOutcome, LoadOutcome, PageRequest, StudioView};
pub use visibility::is_visible;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ViewConfig;
    pub use crate::error::{ConfigError, ViewError};
    pub use crate::listener::{Listeners, ViewEvent};
    pub use crate::state::LoadState;
    pub use crate::view::{EventOutcome, LoadOutcome, PageRequest, StudioView};
}
