//! Studioview Platform Abstraction Layer
//!
//! This crate provides the platform-agnostic traits and types the gallery
//! view is written against.
//!
//! # Architecture
//!
//! - [`Document`] - Element construction, attributes, geometry, and the
//!   optional viewport-intersection capability
//! - [`Rect`] - Viewport-space rectangles used for visibility decisions
//! - [`Key`] - Keyboard input relevant to card activation
//!
//! # Platform Implementations
//!
//! - `studio_platform_web` - Browsers, via `web-sys` (wasm32 only)
//! - `studio_platform_headless` - In-memory document for tests and the CLI

mod document;
mod error;
mod geometry;
mod input;

pub use document::Document;
pub use error::{PlatformError, Result};
pub use geometry::Rect;
pub use input::Key;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::document::Document;
    pub use crate::error::{PlatformError, Result};
    pub use crate::geometry::Rect;
    pub use crate::input::Key;
}
