//! Mounting a gallery into a page

use std::cell::RefCell;
use std::rc::Rc;

use studio_listing::ListingSource;
use studio_platform::{Document, Key, PlatformError};
use studio_view::{LoadOutcome, PageRequest, StudioView, SubscriptionId, ViewConfig, ViewEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, KeyboardEvent};

use crate::document::WebDocument;
use crate::fetch::FetchListingSource;

type SharedView = Rc<RefCell<StudioView<WebDocument>>>;
type EventCallback = Closure<dyn FnMut(Event)>;

/// A gallery attached to the page
///
/// Dropping it detaches every listener and removes the gallery.
pub struct MountedView {
    view: SharedView,
    listeners: Vec<(EventTarget, &'static str, EventCallback)>,
}

impl MountedView {
    /// Register a callback for gallery events
    ///
    /// Callbacks run inside the gallery's own event handling and must not
    /// call back into it synchronously.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ViewEvent) + 'static,
    {
        self.view.borrow_mut().subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.view.borrow_mut().unsubscribe(id)
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        callback: EventCallback,
        options: Option<&AddEventListenerOptions>,
    ) -> Result<(), PlatformError> {
        let function = callback.as_ref().unchecked_ref();
        let added = match options {
            Some(options) => target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event, function, options,
                ),
            None => target.add_event_listener_with_callback(event, function),
        };
        added.map_err(script_error)?;

        self.listeners.push((target.clone(), event, callback));
        Ok(())
    }
}

impl Drop for MountedView {
    fn drop(&mut self) {
        for (target, event, callback) in self.listeners.drain(..) {
            let _ = target
                .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
        }
        if let Ok(mut view) = self.view.try_borrow_mut() {
            let root = view.root().clone();
            view.dom_mut().remove(&root);
        }
    }
}

fn script_error(e: JsValue) -> PlatformError {
    PlatformError::Script(format!("{e:?}"))
}

/// Build a gallery inside the element with id `host_element_id` and start
/// loading its first page
///
/// Scrolling the list or the window re-checks whether the end of the list
/// is on screen. Clicks and key presses inside the list are routed to the
/// card they land in.
pub fn mount(host_element_id: &str, config: ViewConfig) -> Result<MountedView, PlatformError> {
    console_error_panic_hook::set_once();

    let dom = WebDocument::new()?;
    let host = dom.element_by_id(host_element_id)?;
    let window: EventTarget = dom.window().clone().into();
    let handler = dom.intersection_handler();
    let source = Rc::new(FetchListingSource::new(config.listing_url.clone()));

    let mut view =
        StudioView::new(dom, config).map_err(|e| PlatformError::InitFailed(e.to_string()))?;
    let root = view.root().clone();
    let list: EventTarget = view.list().clone().into();
    view.dom_mut().append_child(&host, &root);

    let view: SharedView = Rc::new(RefCell::new(view));
    let mut mounted = MountedView {
        view: Rc::clone(&view),
        listeners: Vec::new(),
    };

    // Lazy images
    let weak = Rc::downgrade(&view);
    *handler.borrow_mut() = Some(Box::new(move |batch: Vec<Element>| {
        let Some(view) = weak.upgrade() else {
            return;
        };
        let Ok(mut gallery) = view.try_borrow_mut() else {
            tracing::warn!("Gallery busy, dropping {} intersections", batch.len());
            return;
        };
        gallery.on_intersection(&batch);
    }));

    // Scrolling, on the list itself and on the page around it
    let passive = AddEventListenerOptions::new();
    passive.set_passive(true);
    for target in [list.clone(), window] {
        let weak = Rc::downgrade(&view);
        let source = Rc::clone(&source);
        let callback = Closure::wrap(Box::new(move |_: Event| {
            let Some(view) = weak.upgrade() else {
                return;
            };
            let request = match view.try_borrow_mut() {
                Ok(mut gallery) => gallery.on_scroll(),
                Err(_) => None,
            };
            if let Some(request) = request {
                spawn_fetch(view, Rc::clone(&source), request);
            }
        }) as Box<dyn FnMut(Event)>);
        mounted.listen(&target, "scroll", callback, Some(&passive))?;
    }

    // Selection by pointer
    let weak = Rc::downgrade(&view);
    let callback = Closure::wrap(Box::new(move |event: Event| {
        let Some(view) = weak.upgrade() else {
            return;
        };
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let outcome = match view.try_borrow_mut() {
            Ok(mut gallery) => gallery.handle_click(&target),
            Err(_) => return,
        };
        if outcome.prevent_default {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(Event)>);
    mounted.listen(&list, "click", callback, None)?;

    // Selection by keyboard
    let weak = Rc::downgrade(&view);
    let callback = Closure::wrap(Box::new(move |event: Event| {
        let Some(view) = weak.upgrade() else {
            return;
        };
        let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let key = Key::from_dom_key(&keyboard.key());
        let outcome = match view.try_borrow_mut() {
            Ok(mut gallery) => gallery.handle_key(&target, key),
            Err(_) => return,
        };
        if outcome.prevent_default {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(Event)>);
    mounted.listen(&list, "keydown", callback, None)?;

    let request = view
        .borrow_mut()
        .begin_load()
        .map_err(|e| PlatformError::InitFailed(e.to_string()))?;
    spawn_fetch(view, source, request);

    Ok(mounted)
}

/// Fetch `request` in the background and render it
///
/// A page that leaves the end of the list on screen immediately asks for
/// the next one, since no scroll event will come to do it.
fn spawn_fetch(view: SharedView, source: Rc<FetchListingSource>, request: PageRequest) {
    wasm_bindgen_futures::spawn_local(async move {
        let response = source.fetch_page(&request.container_id, request.page).await;

        let next = {
            let Ok(mut gallery) = view.try_borrow_mut() else {
                tracing::error!("Gallery busy, dropping page {}", request.page);
                return;
            };
            let outcome = gallery.finish_load(response);
            match outcome {
                Ok(LoadOutcome::Continued { .. }) => gallery.on_scroll(),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Page {} not rendered: {}", request.page, e);
                    None
                }
            }
        };

        if let Some(request) = next {
            spawn_fetch(view, source, request);
        }
    });
}
