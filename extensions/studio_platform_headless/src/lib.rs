//! Studioview Headless Platform
//!
//! An in-memory [`Document`](studio_platform::Document) for tests, the CLI,
//! and any host that wants to drive the gallery without a browser.
//!
//! Layout is deliberately simple: every element is a full-width block,
//! children stack vertically, and an element's height is either fixed,
//! taken from a per-class height table (a stand-in for a stylesheet), or
//! the sum of its children. Elements marked as scroll containers clip
//! their children and carry a scroll offset.
//!
//! # Example
//!
//! ```
//! use studio_platform::Document;
//! use studio_platform_headless::MemoryDocument;
//!
//! let mut doc = MemoryDocument::new(800.0, 600.0);
//! doc.set_class_height("row", 50.0);
//!
//! let list = doc.create_element("div");
//! doc.set_scroll_container(list, 200.0);
//! doc.append_child(&doc.body(), &list);
//!
//! for _ in 0..10 {
//!     let row = doc.create_element("div");
//!     doc.add_class(&row, "row");
//!     doc.append_child(&list, &row);
//! }
//!
//! doc.scroll_to_end(list);
//! let last = doc.last_child(&list).unwrap();
//! assert_eq!(doc.bounding_rect(&last).bottom(), 200.0);
//! ```

mod document;
mod intersection;

pub use document::{MemoryDocument, NodeId};
