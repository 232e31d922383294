//! Class and attribute names of the rendered gallery
//!
//! ```html
//! <div class="studioview" data-theme="..." data-loading data-error>
//!   <div class="studioview-list">
//!     <a class="studioview-project" data-id="104" href="..." target="_blank" title="Pong">
//!       <div class="studioview-thumbnail">
//!         <img class="studioview-image" src="...">
//!       </div>
//!       <div class="studioview-title">Pong</div>
//!       <div class="studioview-author">ada</div>
//!     </a>
//!     <a class="studioview-project studioview-tombstone">...</a>
//!     <div class="studioview-error">...</div>
//!   </div>
//! </div>
//! ```
//!
//! Stylesheets key off these names, so they are part of the public surface.

pub const ROOT_CLASS: &str = "studioview";
pub const LIST_CLASS: &str = "studioview-list";
pub const CARD_CLASS: &str = "studioview-project";
/// Present on a card while it is still a placeholder
pub const TOMBSTONE_CLASS: &str = "studioview-tombstone";
pub const THUMBNAIL_CLASS: &str = "studioview-thumbnail";
pub const TITLE_CLASS: &str = "studioview-title";
pub const AUTHOR_CLASS: &str = "studioview-author";
pub const IMAGE_CLASS: &str = "studioview-image";
/// Present on an image whose real source has not been assigned yet
pub const IMAGE_PENDING_CLASS: &str = "studioview-image-pending";
pub const ERROR_CLASS: &str = "studioview-error";

pub const ID_ATTR: &str = "data-id";
/// Holds the real image URL until the image is activated
pub const DEFERRED_SRC_ATTR: &str = "data-src";
pub const THEME_ATTR: &str = "data-theme";
/// Present on the root while a page request is outstanding
pub const LOADING_ATTR: &str = "data-loading";
/// Present on the root once a page request has failed
pub const ERROR_ATTR: &str = "data-error";
