//! [`Document`] over the browser DOM

use std::cell::RefCell;
use std::rc::Rc;

use studio_platform::{Document, PlatformError, Rect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::observer::{root_margin, same_margin};

/// Receives each batch of elements the browser reports as intersecting
pub type IntersectionHandler = Box<dyn FnMut(Vec<Element>)>;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// The page's DOM
///
/// DOM calls that the browser rejects are logged and otherwise ignored.
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
    intersection_supported: bool,
    observers: Vec<(f32, IntersectionObserver)>,
    handler: Rc<RefCell<Option<IntersectionHandler>>>,
    callback: Option<ObserverCallback>,
}

impl WebDocument {
    pub fn new() -> Result<Self, PlatformError> {
        let window = web_sys::window()
            .ok_or_else(|| PlatformError::Unavailable("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| PlatformError::Unavailable("window has no document".to_string()))?;
        let intersection_supported =
            js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
                .unwrap_or(false);

        if !intersection_supported {
            tracing::info!("IntersectionObserver unavailable, images load eagerly");
        }

        Ok(Self {
            window,
            document,
            intersection_supported,
            observers: Vec::new(),
            handler: Rc::new(RefCell::new(None)),
            callback: None,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn element_by_id(&self, id: &str) -> Result<Element, PlatformError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| PlatformError::ElementNotFound(id.to_string()))
    }

    /// Slot for the intersection handler
    ///
    /// The slot is shared so it can be filled after the document has been
    /// handed to its owner.
    pub fn intersection_handler(&self) -> Rc<RefCell<Option<IntersectionHandler>>> {
        Rc::clone(&self.handler)
    }

    fn observer_for(&mut self, margin: f32) -> Option<&IntersectionObserver> {
        if let Some(index) = self.observers.iter().position(|(m, _)| same_margin(*m, margin)) {
            return Some(&self.observers[index].1);
        }

        let handler = Rc::clone(&self.handler);
        let callback = self.callback.get_or_insert_with(|| {
            Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
                let batch: Vec<Element> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter(|entry| entry.is_intersecting())
                    .map(|entry| entry.target())
                    .collect();
                if batch.is_empty() {
                    return;
                }
                if let Some(handler) = handler.borrow_mut().as_mut() {
                    handler(batch);
                }
            }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
        });

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&root_margin(margin));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                self.observers.push((margin, observer));
                self.observers.last().map(|(_, observer)| observer)
            }
            Err(e) => {
                tracing::warn!("Failed to create IntersectionObserver: {:?}", e);
                None
            }
        }
    }
}

impl Drop for WebDocument {
    fn drop(&mut self) {
        for (_, observer) in &self.observers {
            observer.disconnect();
        }
    }
}

fn log_rejected(operation: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!("{} rejected: {:?}", operation, e);
    }
}

impl Document for WebDocument {
    type Node = Element;

    fn create_element(&mut self, tag: &str) -> Element {
        match self.document.create_element(tag) {
            Ok(element) => element,
            // Only an invalid tag name gets here, and the gallery's tags are fixed
            Err(e) => wasm_bindgen::throw_val(e),
        }
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        log_rejected("appendChild", parent.append_child(child).map(|_| ()));
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn last_child(&self, node: &Element) -> Option<Element> {
        node.last_element_child()
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        log_rejected("setAttribute", node.set_attribute(name, value));
    }

    fn remove_attribute(&mut self, node: &Element, name: &str) {
        log_rejected("removeAttribute", node.remove_attribute(name));
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        log_rejected("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        log_rejected("classList.remove", node.class_list().remove_1(class));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(
            rect.x() as f32,
            rect.y() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    fn viewport_height(&self) -> f32 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .or_else(|| {
                self.document
                    .document_element()
                    .map(|root| root.client_height() as f64)
            })
            .unwrap_or(0.0) as f32
    }

    fn supports_intersection(&self) -> bool {
        self.intersection_supported
    }

    fn observe_intersection(&mut self, node: &Element, root_margin: f32) {
        if !self.intersection_supported {
            return;
        }
        if let Some(observer) = self.observer_for(root_margin) {
            observer.observe(node);
        }
    }

    fn unobserve_intersection(&mut self, node: &Element) {
        for (_, observer) in &self.observers {
            observer.unobserve(node);
        }
    }
}
