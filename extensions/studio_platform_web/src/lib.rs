//! Studioview Web Platform
//!
//! Browser integration for the gallery via `web-sys`.
//!
//! This crate implements the `studio_platform` traits for the browser,
//! providing the DOM document, viewport intersection reporting, and
//! listing fetches.
//!
//! # Architecture
//!
//! The browser owns the event loop. The gallery is driven through:
//!
//! - **scroll** listeners (passive) on the list and the window, which
//!   re-check whether the end of the list is on screen
//! - **click** and **keydown** listeners on the list, delegated to the card
//!   under the event target
//! - **IntersectionObserver** batches, which activate lazy thumbnails
//! - **fetch** for listing pages, awaited on the microtask queue
//!
//! # Usage
//!
//! ```ignore
//! use studio_platform_web::mount;
//! use studio_view::ViewConfig;
//!
//! let gallery = mount("gallery", ViewConfig::new("27205657").with_shuffle(true))?;
//! gallery.subscribe(|event| web_sys::console::log_1(&format!("{event:?}").into()));
//! ```
//!
//! Everything except [`root_margin`] is only built for `wasm32`.

mod observer;

#[cfg(target_arch = "wasm32")]
mod document;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod mount;

pub use observer::root_margin;

#[cfg(target_arch = "wasm32")]
pub use document::{IntersectionHandler, WebDocument};
#[cfg(target_arch = "wasm32")]
pub use fetch::FetchListingSource;
#[cfg(target_arch = "wasm32")]
pub use mount::{mount, MountedView};
