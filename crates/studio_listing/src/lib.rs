//! Studioview Listing
//!
//! The remote listing endpoint, seen from the gallery: given a container
//! and a page number, produce a document; given a document, produce
//! [`ItemRecord`]s and a has-more flag.
//!
//! # Example
//!
//! ```
//! use studio_listing::parse_listing;
//!
//! let page = parse_listing(
//!     r#"<li class="project" data-id="1">
//!          <span class="title">Pong</span>
//!          <span class="owner">by <a>ada</a></span>
//!        </li>"#,
//! )
//! .unwrap();
//!
//! assert_eq!(page.records[0].title, "Pong");
//! assert!(!page.has_more);
//! ```
//!
//! # Features
//!
//! - `network` - [`HttpListingSource`] backed by reqwest

mod error;
#[cfg(feature = "network")]
mod http;
mod parse;
mod record;
mod source;
mod template;

pub use error::{ParseError, Result, TransportError};
#[cfg(feature = "network")]
pub use http::HttpListingSource;
pub use parse::parse_listing;
pub use record::{ItemRecord, ListingPage};
pub use source::{DirectoryListingSource, ListingSource, MemoryListingSource};
pub use template::{UrlTemplate, DEFAULT_ITEM_URL, DEFAULT_LISTING_URL, DEFAULT_THUMBNAIL_URL};
