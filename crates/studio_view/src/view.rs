//! The gallery controller
//!
//! [`StudioView`] owns the rendered gallery and drives paging. It performs
//! no I/O itself: [`begin_load`](StudioView::begin_load) hands out a
//! [`PageRequest`], the host fetches it however it likes, and
//! [`finish_load`](StudioView::finish_load) renders the result. Scroll,
//! click, key, and intersection notifications are fed in by the host.

use rand::rngs::StdRng;
use rand::SeedableRng;
use studio_listing::{parse_listing, ListingPage, ListingSource, TransportError};
use studio_platform::{Document, Key};

use crate::config::ViewConfig;
use crate::error::{Result, ViewError};
use crate::lazy_image::LazyImageLoader;
use crate::listener::{Listeners, SubscriptionId, ViewEvent};
use crate::markup::{
    CARD_CLASS, ERROR_ATTR, ERROR_CLASS, ID_ATTR, LIST_CLASS, LOADING_ATTR, ROOT_CLASS,
    THEME_ATTR, TOMBSTONE_CLASS,
};
use crate::shuffle::shuffle;
use crate::state::{LoadEvent, LoadState, PaginationState};
use crate::tombstone::TombstonePool;
use crate::visibility::is_visible;

/// A page the host should now fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub container_id: String,
    pub page: u32,
    /// The configured listing template, expanded
    pub url: String,
}

/// What [`StudioView::finish_load`] did with a response
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was rendered and more pages follow
    Continued { page: u32, items: usize },
    /// The page was rendered and was the last one
    Ended { page: u32, items: usize },
    /// The fetch or the document failed; the error element is shown
    Failed { page: u32, reason: String },
    /// The gallery had already ended or failed; the response was dropped
    Ignored,
}

/// Result of routing a pointer or key event
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Id of the card the event selected
    pub selected: Option<String>,
    /// The host should suppress the platform's default action
    pub prevent_default: bool,
}

impl EventOutcome {
    fn selected(id: String) -> Self {
        Self {
            selected: Some(id),
            prevent_default: true,
        }
    }
}

/// Incrementally loaded gallery of listing items
pub struct StudioView<D: Document> {
    dom: D,
    config: ViewConfig,
    root: D::Node,
    list: D::Node,
    pagination: PaginationState,
    tombstones: TombstonePool<D::Node>,
    images: LazyImageLoader<D::Node>,
    listeners: Listeners,
    rng: StdRng,
}

impl<D: Document> StudioView<D> {
    /// Build the gallery's root and list elements in `dom`
    ///
    /// The root is left detached; the host attaches
    /// [`root`](Self::root) wherever the gallery belongs.
    pub fn new(dom: D, config: ViewConfig) -> Result<Self> {
        Self::with_listeners(dom, config, Listeners::new())
    }

    pub fn with_listeners(mut dom: D, config: ViewConfig, listeners: Listeners) -> Result<Self> {
        config.validate()?;

        let root = dom.create_element("div");
        dom.add_class(&root, ROOT_CLASS);
        if let Some(theme) = &config.theme {
            dom.set_attribute(&root, THEME_ATTR, theme);
        }

        let list = dom.create_element("div");
        dom.add_class(&list, LIST_CLASS);
        dom.append_child(&root, &list);

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        tracing::debug!(
            container = %config.container_id,
            shuffle = config.shuffle,
            lazy = dom.supports_intersection(),
            "created gallery"
        );

        Ok(Self {
            images: LazyImageLoader::new(config.lazy_margin),
            dom,
            config,
            root,
            list,
            pagination: PaginationState::new(),
            tombstones: TombstonePool::new(),
            listeners,
            rng,
        })
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Start loading the current page
    ///
    /// Pads the list with placeholders and marks the root as loading. Fails
    /// with [`ViewError::InvalidState`] unless the gallery is idle.
    pub fn begin_load(&mut self) -> Result<PageRequest> {
        if !self.pagination.can_load() {
            return Err(ViewError::InvalidState {
                operation: "begin loading",
                state: self.pagination.state(),
            });
        }

        self.tombstones
            .add_placeholders(&mut self.dom, &self.list, self.config.placeholders_per_page);
        self.pagination.apply(LoadEvent::Start, "begin loading")?;
        self.dom.set_attribute(&self.root, LOADING_ATTR, "");

        let page = self.pagination.current_page();
        let request = PageRequest {
            container_id: self.config.container_id.clone(),
            page,
            url: self.config.listing_url.expand(&self.config.container_id, page),
        };
        tracing::debug!(page, url = %request.url, "requesting page");
        Ok(request)
    }

    /// Render the response to the outstanding request
    ///
    /// Responses arriving after the gallery ended or failed are dropped.
    /// Calling this with no request outstanding is an error.
    pub fn finish_load(
        &mut self,
        response: std::result::Result<String, TransportError>,
    ) -> Result<LoadOutcome> {
        match self.pagination.state() {
            LoadState::Loading => {}
            LoadState::Ended | LoadState::Errored => {
                tracing::warn!(state = %self.pagination.state(), "dropping late page response");
                return Ok(LoadOutcome::Ignored);
            }
            state @ LoadState::Idle => {
                return Err(ViewError::InvalidState {
                    operation: "finish loading",
                    state,
                });
            }
        }

        let page = self.pagination.current_page();
        let listing = response
            .map_err(|e| e.to_string())
            .and_then(|body| parse_listing(&body).map_err(|e| e.to_string()));

        match listing {
            Ok(listing) => self.render_page(page, listing),
            Err(reason) => self.fail(page, reason),
        }
    }

    /// Request, fetch, and render the current page through `source`
    pub async fn load_next_page<S: ListingSource>(&mut self, source: &S) -> Result<LoadOutcome> {
        let request = self.begin_load()?;
        let response = source.fetch_page(&request.container_id, request.page).await;
        self.finish_load(response)
    }

    /// Check whether the end of the list is on screen
    ///
    /// Returns the request to perform when it is and the gallery is idle.
    /// The check only looks at the current geometry, so calling it again
    /// while the end stays visible keeps loading pages.
    pub fn on_scroll(&mut self) -> Option<PageRequest> {
        if !self.pagination.can_load() {
            return None;
        }

        // An empty list has nothing left to scroll through
        if let Some(last) = self.dom.last_child(&self.list) {
            if !is_visible(&self.dom, &last, &self.root) {
                return None;
            }
        }

        match self.begin_load() {
            Ok(request) => Some(request),
            Err(e) => {
                tracing::warn!("scroll-triggered load failed: {}", e);
                None
            }
        }
    }

    fn render_page(&mut self, page: u32, listing: ListingPage) -> Result<LoadOutcome> {
        let ListingPage {
            mut records,
            has_more,
        } = listing;

        if self.config.shuffle {
            shuffle(&mut records, &mut self.rng);
        }

        for record in &records {
            self.tombstones.populate_next(
                &mut self.dom,
                &self.list,
                &mut self.images,
                record,
                &self.config,
            );
        }
        self.tombstones.cleanup_unused(&mut self.dom);
        self.dom.remove_attribute(&self.root, LOADING_ATTR);

        let items = records.len();
        let outcome = if has_more {
            self.pagination.apply(LoadEvent::Continue, "finish loading")?;
            LoadOutcome::Continued { page, items }
        } else {
            self.pagination.apply(LoadEvent::End, "finish loading")?;
            tracing::info!(page, "reached the end of the listing");
            self.listeners.emit(&ViewEvent::Ended);
            LoadOutcome::Ended { page, items }
        };

        tracing::debug!(page, items, has_more, "rendered page");
        self.listeners.emit(&ViewEvent::PageLoaded { page, items });
        Ok(outcome)
    }

    fn fail(&mut self, page: u32, reason: String) -> Result<LoadOutcome> {
        tracing::warn!(page, "failed to load page: {}", reason);

        self.tombstones.cleanup_unused(&mut self.dom);
        self.pagination.apply(LoadEvent::Fail, "finish loading")?;

        let error = self.dom.create_element("div");
        self.dom.add_class(&error, ERROR_CLASS);
        self.dom.set_text(&error, &self.config.error_message);
        self.dom.append_child(&self.list, &error);

        self.dom.remove_attribute(&self.root, LOADING_ATTR);
        self.dom.set_attribute(&self.root, ERROR_ATTR, "");

        Ok(LoadOutcome::Failed { page, reason })
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Activate lazy images the document reports near the viewport
    ///
    /// Returns the number of images that received their source.
    pub fn on_intersection(&mut self, intersecting: &[D::Node]) -> usize {
        self.images.activate(&mut self.dom, intersecting)
    }

    /// Route a click on `target`
    pub fn handle_click(&mut self, target: &D::Node) -> EventOutcome {
        match self.card_id(target) {
            Some(id) => self.select(id),
            None => EventOutcome::default(),
        }
    }

    /// Route a key press while `target` has focus
    ///
    /// Only the activation key selects; every other key is left alone.
    pub fn handle_key(&mut self, target: &D::Node, key: Key) -> EventOutcome {
        if !key.is_activation() {
            return EventOutcome::default();
        }
        self.handle_click(target)
    }

    fn select(&mut self, id: String) -> EventOutcome {
        tracing::debug!(%id, "selected");
        self.listeners.emit(&ViewEvent::Selected { id: id.clone() });
        EventOutcome::selected(id)
    }

    /// Id of the populated card containing `target`, if any
    ///
    /// Walks from `target` up to and including the list.
    fn card_id(&self, target: &D::Node) -> Option<String> {
        let mut current = Some(target.clone());
        while let Some(node) = current {
            let is_card = self.dom.has_class(&node, CARD_CLASS)
                && !self.dom.has_class(&node, TOMBSTONE_CLASS);
            if is_card {
                if let Some(id) = self.dom.attribute(&node, ID_ATTR) {
                    return Some(id);
                }
            }
            if node == self.list || node == self.root {
                return None;
            }
            current = self.dom.parent(&node);
        }
        None
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ViewEvent) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn state(&self) -> LoadState {
        self.pagination.state()
    }

    /// The page the next (or outstanding) request is for
    pub fn current_page(&self) -> u32 {
        self.pagination.current_page()
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.state().is_loading()
    }

    /// Whether paging has stopped for good, by reaching the end or failing
    pub fn is_ended(&self) -> bool {
        self.pagination.state().is_terminal()
    }

    pub fn can_load_next_page(&self) -> bool {
        self.pagination.can_load()
    }

    pub fn unused_tombstones(&self) -> usize {
        self.tombstones.unused()
    }

    pub fn populated_cards(&self) -> usize {
        self.tombstones.populated()
    }

    pub fn pending_images(&self) -> usize {
        self.images.pending()
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn root(&self) -> &D::Node {
        &self.root
    }

    pub fn list(&self) -> &D::Node {
        &self.list
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Mutable access to the document, for hosts that scroll or restyle it
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }
}

impl<D: Document> std::fmt::Debug for StudioView<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioView")
            .field("container_id", &self.config.container_id)
            .field("pagination", &self.pagination)
            .field("unused_tombstones", &self.tombstones.unused())
            .field("populated_cards", &self.tombstones.populated())
            .field("pending_images", &self.images.pending())
            .finish()
    }
}
