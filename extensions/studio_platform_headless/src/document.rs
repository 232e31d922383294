//! In-memory document tree

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use studio_platform::{Document, Rect};

use crate::intersection::IntersectionRegistry;

new_key_type! {
    /// Handle to an element in a [`MemoryDocument`]
    pub struct NodeId;
}

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: FxHashMap<String, String>,
    classes: SmallVec<[String; 4]>,
    text: String,
    /// Fixed outer height, overriding class heights and content height
    height: Option<f32>,
    /// Scroll containers clip their children to their own box
    clips: bool,
    scroll_top: f32,
}

/// In-memory implementation of [`Document`]
///
/// Detached elements stay in the arena, so handles remain valid after
/// [`Document::remove`], mirroring how the browser keeps removed elements
/// alive while script still references them.
pub struct MemoryDocument {
    nodes: SlotMap<NodeId, NodeData>,
    body: NodeId,
    viewport_width: f32,
    viewport_height: f32,
    document_scroll: f32,
    class_heights: FxHashMap<String, f32>,
    /// `None` when intersection reporting is disabled
    intersections: Option<IntersectionRegistry>,
}

impl MemoryDocument {
    /// Create a document with the given viewport size and intersection support
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData {
            tag: "body".to_string(),
            ..Default::default()
        });

        Self {
            nodes,
            body,
            viewport_width,
            viewport_height,
            document_scroll: 0.0,
            class_heights: FxHashMap::default(),
            intersections: Some(IntersectionRegistry::default()),
        }
    }

    /// Create a document that reports no intersection capability
    pub fn without_intersection(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            intersections: None,
            ..Self::new(viewport_width, viewport_height)
        }
    }

    /// The document body; elements are only laid out when connected to it
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.tag.as_str())
    }

    /// Number of elements ever created, attached or not
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `node` is connected to the body
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Descendants of `root` carrying `class`, in document order
    pub fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if id != root && node.classes.iter().any(|c| c == class) {
                found.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        found
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Give every element carrying `class` the given height
    pub fn set_class_height(&mut self, class: &str, height: f32) {
        self.class_heights.insert(class.to_string(), height);
    }

    /// Fix the outer height of `node`, or return it to automatic sizing
    pub fn set_height(&mut self, node: NodeId, height: Option<f32>) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.height = height;
        }
    }

    /// Turn `node` into a clipping scroll container of the given height
    pub fn set_scroll_container(&mut self, node: NodeId, height: f32) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.height = Some(height);
            data.clips = true;
        }
    }

    pub fn scroll_top(&self, node: NodeId) -> f32 {
        self.nodes.get(node).map_or(0.0, |n| n.scroll_top)
    }

    /// Largest valid scroll offset of `node`
    pub fn max_scroll_top(&self, node: NodeId) -> f32 {
        (self.content_height(node) - self.outer_height(node)).max(0.0)
    }

    /// Scroll `node` to `offset`, clamped to its scrollable range
    pub fn set_scroll_top(&mut self, node: NodeId, offset: f32) {
        let max = self.max_scroll_top(node);
        if let Some(data) = self.nodes.get_mut(node) {
            data.scroll_top = offset.clamp(0.0, max);
        }
    }

    pub fn scroll_by(&mut self, node: NodeId, delta: f32) {
        let offset = self.scroll_top(node) + delta;
        self.set_scroll_top(node, offset);
    }

    pub fn scroll_to_end(&mut self, node: NodeId) {
        let max = self.max_scroll_top(node);
        self.set_scroll_top(node, max);
    }

    /// Scroll the whole document, shifting every connected element up
    pub fn set_document_scroll(&mut self, offset: f32) {
        self.document_scroll = offset;
    }

    fn outer_height(&self, node: NodeId) -> f32 {
        let Some(data) = self.nodes.get(node) else {
            return 0.0;
        };
        if let Some(height) = data.height {
            return height;
        }
        let class_height = data
            .classes
            .iter()
            .filter_map(|c| self.class_heights.get(c).copied())
            .reduce(f32::max);
        match class_height {
            Some(height) => height,
            None => self.content_height(node),
        }
    }

    fn content_height(&self, node: NodeId) -> f32 {
        self.nodes
            .get(node)
            .map_or(0.0, |n| n.children.iter().map(|&c| self.outer_height(c)).sum())
    }

    fn top_of(&self, node: NodeId) -> f32 {
        let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) else {
            return -self.document_scroll;
        };
        let Some(parent_data) = self.nodes.get(parent) else {
            return 0.0;
        };
        let preceding: f32 = parent_data
            .children
            .iter()
            .take_while(|&&c| c != node)
            .map(|&c| self.outer_height(c))
            .sum();
        self.top_of(parent) - parent_data.scroll_top + preceding
    }

    /// Clip rects of every scroll container enclosing `node`, innermost first
    pub(crate) fn clip_rects(&self, node: NodeId) -> Vec<Rect> {
        let mut rects = Vec::new();
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            let Some(data) = self.nodes.get(id) else {
                break;
            };
            if data.clips {
                rects.push(self.bounding_rect(&id));
            }
            current = data.parent;
        }
        rects
    }

    // =========================================================================
    // Intersection reporting
    // =========================================================================

    /// Observed elements currently within their root margin of the viewport
    ///
    /// Mirrors one `IntersectionObserver` callback batch. Elements stay
    /// observed until the caller unobserves them.
    pub fn take_intersections(&self) -> Vec<NodeId> {
        match &self.intersections {
            Some(registry) => registry.intersecting(self),
            None => Vec::new(),
        }
    }

    /// Number of elements currently observed
    pub fn observed_count(&self) -> usize {
        self.intersections.as_ref().map_or(0, |r| r.len())
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.intersections
            .as_ref()
            .is_some_and(|r| r.contains(node))
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent_data) = self.nodes.get_mut(parent) {
            parent_data.children.retain(|&c| c != node);
        }
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(NodeData {
            tag: tag.to_string(),
            ..Default::default()
        })
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if !self.nodes.contains_key(*parent) || !self.nodes.contains_key(*child) {
            tracing::warn!("append_child with unknown node");
            return;
        }
        self.detach(*child);
        if let Some(data) = self.nodes.get_mut(*child) {
            data.parent = Some(*parent);
        }
        if let Some(data) = self.nodes.get_mut(*parent) {
            data.children.push(*child);
        }
    }

    fn remove(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(*node).and_then(|n| n.parent)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(*node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn last_child(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(*node).and_then(|n| n.children.last().copied())
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        let Some(data) = self.nodes.get_mut(*node) else {
            return;
        };
        if name == "class" {
            data.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            data.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) {
        let Some(data) = self.nodes.get_mut(*node) else {
            return;
        };
        if name == "class" {
            data.classes.clear();
        } else {
            data.attributes.remove(name);
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let data = self.nodes.get(*node)?;
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attributes.get(name).cloned()
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(*node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(*node) {
            data.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes
            .get(*node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        // Like `textContent`, replacing the text drops every child
        for child in self.children(node) {
            self.detach(child);
        }
        if let Some(data) = self.nodes.get_mut(*node) {
            data.text = text.to_string();
        }
    }

    fn text(&self, node: &NodeId) -> String {
        let Some(data) = self.nodes.get(*node) else {
            return String::new();
        };
        let mut text = data.text.clone();
        for child in &data.children {
            text.push_str(&self.text(child));
        }
        text
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        if !self.is_connected(*node) {
            return Rect::ZERO;
        }
        Rect::new(
            0.0,
            self.top_of(*node),
            self.viewport_width,
            self.outer_height(*node),
        )
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn supports_intersection(&self) -> bool {
        self.intersections.is_some()
    }

    fn observe_intersection(&mut self, node: &NodeId, root_margin: f32) {
        if let Some(registry) = self.intersections.as_mut() {
            registry.observe(*node, root_margin);
        }
    }

    fn unobserve_intersection(&mut self, node: &NodeId) {
        if let Some(registry) = self.intersections.as_mut() {
            registry.unobserve(*node);
        }
    }
}
