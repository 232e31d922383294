//! Document trait and abstraction

use std::fmt::Debug;

use crate::geometry::Rect;

/// Document abstraction trait
///
/// This trait is implemented by each platform backend (browser, headless)
/// to provide the element construction primitives the gallery is built
/// from. Element handles are cheap to clone and compare; they never own
/// the element, the document does.
///
/// Mutating operations are infallible from the caller's point of view.
/// Backends that can fail (the browser) log and carry on, since there is
/// nothing the gallery could do to recover a half-applied DOM mutation.
pub trait Document {
    /// Handle to an element in this document
    type Node: Clone + PartialEq + Debug;

    /// Create a detached element with the given tag name
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Append `child` as the last child of `parent`
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Detach `node` from its parent
    ///
    /// Does nothing if the node is already detached.
    fn remove(&mut self, node: &Self::Node);

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn last_child(&self, node: &Self::Node) -> Option<Self::Node> {
        self.children(node).pop()
    }

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&mut self, node: &Self::Node, name: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Replace the text content of `node`
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Concatenated text content of `node` and its descendants
    fn text(&self, node: &Self::Node) -> String;

    /// Border box of `node` in viewport coordinates
    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Height of the document viewport
    fn viewport_height(&self) -> f32;

    /// Whether this document can report viewport intersections
    ///
    /// Backends without the capability keep the default, and callers fall
    /// back to eager behavior.
    fn supports_intersection(&self) -> bool {
        false
    }

    /// Start reporting when `node` comes within `root_margin` of the viewport
    fn observe_intersection(&mut self, _node: &Self::Node, _root_margin: f32) {}

    /// Stop reporting intersections for `node`
    fn unobserve_intersection(&mut self, _node: &Self::Node) {}
}
