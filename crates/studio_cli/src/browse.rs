//! Headless browsing session
//!
//! Drives a [`StudioView`] over the in-memory document the way a reader
//! would: load the first page, scroll the list to its end, let the view
//! decide whether that calls for another page, repeat.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use studio_listing::{DirectoryListingSource, HttpListingSource, ListingSource};
use studio_platform::Document;
use studio_platform_headless::MemoryDocument;
use studio_view::markup::{AUTHOR_CLASS, CARD_CLASS, ID_ATTR, IMAGE_CLASS};
use studio_view::{Listeners, LoadOutcome, LoadState, StudioView, ViewConfig, ViewEvent};
use tracing::{debug, info, warn};

const VIEWPORT_WIDTH: f32 = 1024.0;
const CARD_HEIGHT: f32 = 120.0;

/// Where pages come from
pub enum Source {
    Directory(DirectoryListingSource),
    Http(HttpListingSource),
}

impl ListingSource for Source {
    async fn fetch_page(&self, container_id: &str, page: u32) -> studio_listing::Result<String> {
        match self {
            Source::Directory(source) => source.fetch_page(container_id, page).await,
            Source::Http(source) => source.fetch_page(container_id, page).await,
        }
    }
}

pub struct BrowseOptions {
    /// Stop after this many pages
    pub max_pages: Option<u32>,
    /// Viewport height; the list scrolls within a box of the same height
    pub viewport: f32,
}

/// A rendered card as the reader would see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_loaded: bool,
}

#[derive(Debug)]
pub struct BrowseReport {
    pub pages: u32,
    pub state: LoadState,
    pub cards: Vec<CardSummary>,
    pub events: Vec<ViewEvent>,
    pub pending_images: usize,
}

pub async fn browse<S: ListingSource>(
    config: ViewConfig,
    source: &S,
    options: &BrowseOptions,
) -> Result<BrowseReport> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let listeners = Listeners::new().with(move |event| sink.borrow_mut().push(event.clone()));

    let mut dom = MemoryDocument::new(VIEWPORT_WIDTH, options.viewport);
    dom.set_class_height(CARD_CLASS, CARD_HEIGHT);
    let mut view = StudioView::with_listeners(dom, config, listeners)?;

    let root = *view.root();
    let list = *view.list();
    let body = view.dom().body();
    view.dom_mut().append_child(&body, &root);
    view.dom_mut().set_scroll_container(list, options.viewport);

    let mut pages = 0;
    let mut next = Some(view.begin_load()?);

    while let Some(request) = next.take() {
        info!("Fetching page {} ({})", request.page, request.url);
        let response = source.fetch_page(&request.container_id, request.page).await;

        match view.finish_load(response)? {
            LoadOutcome::Continued { page, items } => info!("Page {}: {} items", page, items),
            LoadOutcome::Ended { page, items } => info!("Page {}: {} items (last)", page, items),
            LoadOutcome::Failed { page, reason } => warn!("Page {} failed: {}", page, reason),
            LoadOutcome::Ignored => {}
        }
        pages += 1;
        activate_visible_images(&mut view);

        if options.max_pages.is_some_and(|max| pages >= max) {
            debug!("Page limit reached");
            break;
        }

        view.dom_mut().scroll_to_end(list);
        activate_visible_images(&mut view);
        next = view.on_scroll();
    }

    let cards = summarize_cards(&view);
    let report = BrowseReport {
        pages,
        state: view.state(),
        cards,
        events: events.borrow().clone(),
        pending_images: view.pending_images(),
    };
    Ok(report)
}

fn activate_visible_images(view: &mut StudioView<MemoryDocument>) {
    let hits = view.dom().take_intersections();
    let activated = view.on_intersection(&hits);
    debug!("Activated {} images", activated);
}

fn summarize_cards(view: &StudioView<MemoryDocument>) -> Vec<CardSummary> {
    let dom = view.dom();
    dom.query_class(*view.list(), CARD_CLASS)
        .into_iter()
        .filter_map(|card| {
            let id = dom.attribute(&card, ID_ATTR)?;
            let title = dom.attribute(&card, "title").unwrap_or_default();
            let author = dom
                .query_class(card, AUTHOR_CLASS)
                .first()
                .map(|slot| dom.text(slot))
                .unwrap_or_default();
            let image_loaded = dom
                .query_class(card, IMAGE_CLASS)
                .first()
                .is_some_and(|image| dom.attribute(image, "src").is_some());
            Some(CardSummary {
                id,
                title,
                author,
                image_loaded,
            })
        })
        .collect()
}
