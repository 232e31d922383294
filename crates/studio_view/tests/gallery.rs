//! End-to-end gallery behavior against the headless document

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use studio_listing::{DirectoryListingSource, ListingSource, MemoryListingSource, TransportError};
use studio_platform::Document;
use studio_platform_headless::{MemoryDocument, NodeId};
use studio_view::markup::{CARD_CLASS, ERROR_ATTR, ERROR_CLASS, IMAGE_CLASS, TITLE_CLASS};
use studio_view::{LoadOutcome, LoadState, StudioView, ViewConfig, ViewError, ViewEvent};

const CARD_HEIGHT: f32 = 100.0;
const LIST_HEIGHT: f32 = 300.0;

type Events = Rc<RefCell<Vec<ViewEvent>>>;

fn listing(records: &[(&str, &str, &str)], has_more: bool) -> String {
    let mut html = String::from("<ul>");
    for (id, title, author) in records {
        html.push_str(&format!(
            r#"<li class="project thumb item" data-id="{id}">
                 <span class="title"><a href="/projects/{id}/">{title}</a></span>
                 <span class="owner">by <a href="/users/{author}/">{author}</a></span>
               </li>"#
        ));
    }
    html.push_str("</ul>");
    if has_more {
        html.push_str(r#"<a rel="next" href="?page=next">Next</a>"#);
    }
    html
}

fn numbered(count: usize) -> Vec<(String, String, String)> {
    (1..=count)
        .map(|i| (i.to_string(), format!("Project {i}"), format!("user{i}")))
        .collect()
}

fn as_refs(records: &[(String, String, String)]) -> Vec<(&str, &str, &str)> {
    records
        .iter()
        .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
        .collect()
}

/// A mounted gallery whose list scrolls inside a 300px box
fn mount_with(dom: MemoryDocument, config: ViewConfig) -> (StudioView<MemoryDocument>, Events) {
    let events: Events = Rc::default();
    let mut view = StudioView::new(dom, config).unwrap();
    let sink = Rc::clone(&events);
    view.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    let root = *view.root();
    let list = *view.list();
    let dom = view.dom_mut();
    let body = dom.body();
    dom.append_child(&body, &root);
    dom.set_class_height(CARD_CLASS, CARD_HEIGHT);
    dom.set_scroll_container(list, LIST_HEIGHT);

    (view, events)
}

fn mount(config: ViewConfig) -> (StudioView<MemoryDocument>, Events) {
    mount_with(MemoryDocument::new(800.0, 600.0), config)
}

fn config() -> ViewConfig {
    ViewConfig::new("27205657")
}

fn cards(view: &StudioView<MemoryDocument>) -> Vec<NodeId> {
    view.dom().query_class(*view.list(), CARD_CLASS)
}

fn card_ids(view: &StudioView<MemoryDocument>) -> Vec<String> {
    cards(view)
        .iter()
        .filter_map(|card| view.dom().attribute(card, "data-id"))
        .collect()
}

fn assert_accounted(view: &StudioView<MemoryDocument>) {
    assert_eq!(
        view.unused_tombstones() + view.populated_cards(),
        cards(view).len()
    );
}

fn scroll_list_to_end(view: &mut StudioView<MemoryDocument>) {
    let list = *view.list();
    view.dom_mut().scroll_to_end(list);
}

#[test]
fn test_empty_first_page_ends() {
    let source = MemoryListingSource::new().with_page(1, listing(&[], false));
    let (mut view, events) = mount(config());

    let outcome = pollster::block_on(view.load_next_page(&source)).unwrap();

    assert_eq!(outcome, LoadOutcome::Ended { page: 1, items: 0 });
    assert_eq!(view.state(), LoadState::Ended);
    assert!(view.is_ended());
    assert!(cards(&view).is_empty());
    assert_eq!(view.unused_tombstones(), 0);
    assert_eq!(
        *events.borrow(),
        vec![ViewEvent::Ended, ViewEvent::PageLoaded { page: 1, items: 0 }]
    );

    assert_eq!(view.on_scroll(), None);
    assert_eq!(source.requests(), 1);
}

#[test]
fn test_partial_page_populates_in_order() {
    let (mut view, events) = mount(config());

    let request = view.begin_load().unwrap();
    assert_eq!(request.page, 1);
    assert_eq!(cards(&view).len(), 9);
    assert_accounted(&view);

    let body = listing(&[("1", "A", "X"), ("2", "B", "Y")], true);
    let outcome = view.finish_load(Ok(body)).unwrap();

    assert_eq!(outcome, LoadOutcome::Continued { page: 1, items: 2 });
    assert_eq!(card_ids(&view), vec!["1", "2"]);
    assert_eq!(view.dom().children(view.list()).len(), 2);
    assert_eq!(view.current_page(), 2);
    assert_eq!(view.state(), LoadState::Idle);
    assert!(!view.is_loading());
    assert_eq!(
        *events.borrow(),
        vec![ViewEvent::PageLoaded { page: 1, items: 2 }]
    );
    assert_accounted(&view);

    let first = cards(&view)[0];
    assert_eq!(
        view.dom().attribute(&first, "href").as_deref(),
        Some("https://scratch.mit.edu/projects/1/")
    );
    assert_eq!(view.dom().attribute(&first, "title").as_deref(), Some("A"));
}

#[test]
fn test_transport_failure_stops_paging() {
    let source = MemoryListingSource::new().fail_page(1);
    let (mut view, events) = mount(config());

    let outcome = pollster::block_on(view.load_next_page(&source)).unwrap();

    assert!(matches!(outcome, LoadOutcome::Failed { page: 1, .. }));
    assert_eq!(view.populated_cards(), 0);
    assert!(cards(&view).is_empty());
    assert_eq!(view.dom().query_class(*view.list(), ERROR_CLASS).len(), 1);
    assert!(view.dom().attribute(view.root(), ERROR_ATTR).is_some());
    assert!(view.is_ended());
    assert!(events.borrow().is_empty());

    scroll_list_to_end(&mut view);
    assert_eq!(view.on_scroll(), None);
    assert!(matches!(
        view.begin_load(),
        Err(ViewError::InvalidState {
            state: LoadState::Errored,
            ..
        })
    ));
    assert_eq!(source.requests(), 1);
    assert_eq!(view.dom().query_class(*view.list(), ERROR_CLASS).len(), 1);
}

#[test]
fn test_failure_after_success_keeps_earlier_cards() {
    let source = MemoryListingSource::new()
        .with_page(1, listing(&[("1", "A", "X")], true))
        .fail_page(2);
    let (mut view, _) = mount(config());

    pollster::block_on(view.load_next_page(&source)).unwrap();
    let outcome = pollster::block_on(view.load_next_page(&source)).unwrap();

    assert!(matches!(outcome, LoadOutcome::Failed { page: 2, .. }));
    assert_eq!(card_ids(&view), vec!["1"]);
    assert_eq!(view.unused_tombstones(), 0);
    assert_accounted(&view);

    let last = view.dom().last_child(view.list()).unwrap();
    assert!(view.dom().has_class(&last, ERROR_CLASS));
    assert_eq!(
        view.dom().text(&last),
        "There was an error loading the next page of projects."
    );
}

#[test]
fn test_http_status_failure() {
    let (mut view, _) = mount(config());
    view.begin_load().unwrap();
    let outcome = view.finish_load(Err(TransportError::Status(404))).unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Failed {
            page: 1,
            reason: "HTTP error: 404".to_string()
        }
    );
}

#[test]
fn test_nested_click_resolves_card() {
    let (mut view, events) = mount(config());
    view.begin_load().unwrap();
    view.finish_load(Ok(listing(&[("1", "A", "X"), ("2", "B", "Y")], true))).unwrap();

    let second = cards(&view)[1];
    let title = view.dom().query_class(second, TITLE_CLASS)[0];
    let image = view.dom().query_class(second, IMAGE_CLASS)[0];

    let outcome = view.handle_click(&title);
    assert_eq!(outcome.selected.as_deref(), Some("2"));
    assert!(outcome.prevent_default);

    let outcome = view.handle_click(&image);
    assert_eq!(outcome.selected.as_deref(), Some("2"));

    let selections: Vec<_> = events
        .borrow()
        .iter()
        .filter(|e| matches!(e, ViewEvent::Selected { .. }))
        .cloned()
        .collect();
    assert_eq!(
        selections,
        vec![
            ViewEvent::Selected { id: "2".into() },
            ViewEvent::Selected { id: "2".into() }
        ]
    );
}

#[test]
fn test_click_outside_list_selects_nothing() {
    let (mut view, events) = mount(config());
    let body = view.dom().body();
    let outcome = view.handle_click(&body);

    assert_eq!(outcome.selected, None);
    assert!(!outcome.prevent_default);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_scroll_waits_for_clipped_end() {
    let records = numbered(5);
    let (mut view, _) = mount(config());
    view.begin_load().unwrap();
    view.finish_load(Ok(listing(&as_refs(&records), true))).unwrap();

    // The fifth card sits at 400px, inside the viewport but below the
    // list's 300px box.
    let last = view.dom().last_child(view.list()).unwrap();
    assert!(view.dom().bounding_rect(&last).bottom() < 600.0);
    assert_eq!(view.on_scroll(), None);

    scroll_list_to_end(&mut view);
    let request = view.on_scroll().unwrap();
    assert_eq!(request.page, 2);
    assert_eq!(
        request.url,
        "https://scratch.mit.edu/site-api/projects/in/27205657/2/"
    );
}

#[test]
fn test_single_request_in_flight() {
    let (mut view, _) = mount(config());
    view.begin_load().unwrap();
    view.finish_load(Ok(listing(&[("1", "A", "X")], true))).unwrap();

    // One short card leaves the end of the list on screen
    assert!(view.on_scroll().is_some());
    assert!(view.is_loading());
    assert_eq!(view.on_scroll(), None);
    assert!(matches!(
        view.begin_load(),
        Err(ViewError::InvalidState {
            state: LoadState::Loading,
            ..
        })
    ));
    assert_accounted(&view);

    view.finish_load(Ok(listing(&[("2", "B", "Y")], true))).unwrap();
    assert_eq!(view.current_page(), 3);

    // Still visible, so the next scroll loads again
    assert!(view.on_scroll().is_some());
}

#[test]
fn test_invariant_across_pages() {
    let page_one = numbered(9);
    let page_two = vec![("10".to_string(), "Ten".to_string(), "u".to_string())];
    let source = MemoryListingSource::new()
        .with_page(1, listing(&as_refs(&page_one), true))
        .with_page(2, listing(&as_refs(&page_two), false));
    let (mut view, events) = mount(config().with_placeholders_per_page(4));

    for _ in 0..2 {
        let request = view.begin_load().unwrap();
        assert_accounted(&view);
        let body = pollster::block_on(source.fetch_page(&request.container_id, request.page));
        view.finish_load(body).unwrap();
        assert_accounted(&view);
    }

    assert_eq!(view.populated_cards(), 10);
    assert_eq!(card_ids(&view).len(), 10);
    assert_eq!(card_ids(&view).last().map(String::as_str), Some("10"));
    assert_eq!(
        events
            .borrow()
            .iter()
            .filter(|e| **e == ViewEvent::Ended)
            .count(),
        1
    );
}

#[test]
fn test_lazy_images_activate_once() {
    let records = numbered(8);
    let (mut view, _) = mount(config());
    view.begin_load().unwrap();
    view.finish_load(Ok(listing(&as_refs(&records), true))).unwrap();
    assert_eq!(view.pending_images(), 8);

    // 300px list plus the 100px margin reaches the card at 400px
    let hits = view.dom().take_intersections();
    assert_eq!(view.on_intersection(&hits), 5);
    assert_eq!(view.on_intersection(&hits), 0);
    assert_eq!(view.pending_images(), 3);

    let first_image = view.dom().query_class(cards(&view)[0], IMAGE_CLASS)[0];
    assert_eq!(
        view.dom().attribute(&first_image, "src").as_deref(),
        Some("https://cdn2.scratch.mit.edu/get_image/project/1_144x108.png")
    );
    assert!(!view.dom().is_observed(first_image));
    assert!(view.dom().take_intersections().is_empty());

    scroll_list_to_end(&mut view);
    let hits = view.dom().take_intersections();
    assert_eq!(view.on_intersection(&hits), 3);
    assert_eq!(view.pending_images(), 0);
}

#[test]
fn test_images_are_eager_without_intersection() {
    let dom = MemoryDocument::without_intersection(800.0, 600.0);
    let (mut view, _) = mount_with(dom, config());
    view.begin_load().unwrap();
    view.finish_load(Ok(listing(&[("1", "A", "X")], false))).unwrap();

    assert_eq!(view.pending_images(), 0);
    let image = view.dom().query_class(cards(&view)[0], IMAGE_CLASS)[0];
    assert!(view.dom().attribute(&image, "src").is_some());
    assert!(view.dom().attribute(&image, "data-src").is_none());
}

#[test]
fn test_shuffle_keeps_every_record() {
    let records = numbered(6);
    let (mut view, _) = mount(config().with_shuffle(true).with_shuffle_seed(3));
    view.begin_load().unwrap();
    view.finish_load(Ok(listing(&as_refs(&records), false))).unwrap();

    let shown: BTreeSet<String> = card_ids(&view).into_iter().collect();
    let expected: BTreeSet<String> = records.into_iter().map(|(id, _, _)| id).collect();
    assert_eq!(shown, expected);
    assert_eq!(view.populated_cards(), 6);
    assert_accounted(&view);
}

#[test]
fn test_pages_from_fixture_directory() {
    let source = DirectoryListingSource::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../studio_listing/tests/fixtures"
    ));
    let (mut view, events) = mount(config());

    let first = pollster::block_on(view.load_next_page(&source)).unwrap();
    assert_eq!(first, LoadOutcome::Continued { page: 1, items: 3 });

    scroll_list_to_end(&mut view);
    let request = view.on_scroll().unwrap();
    let body = pollster::block_on(source.fetch_page(&request.container_id, request.page));
    let second = view.finish_load(body).unwrap();

    assert_eq!(second, LoadOutcome::Ended { page: 2, items: 1 });
    assert_eq!(card_ids(&view), vec!["104", "2211", "38090", "51"]);
    assert_eq!(view.on_scroll(), None);
    assert_eq!(
        *events.borrow(),
        vec![
            ViewEvent::PageLoaded { page: 1, items: 3 },
            ViewEvent::Ended,
            ViewEvent::PageLoaded { page: 2, items: 1 },
        ]
    );
}
