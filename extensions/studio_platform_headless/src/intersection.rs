//! Geometry-driven stand-in for `IntersectionObserver`

use studio_platform::{Document, Rect};

use crate::document::{MemoryDocument, NodeId};

/// Observed elements and their root margins
#[derive(Debug, Default)]
pub(crate) struct IntersectionRegistry {
    observed: Vec<(NodeId, f32)>,
}

impl IntersectionRegistry {
    pub(crate) fn observe(&mut self, node: NodeId, root_margin: f32) {
        match self.observed.iter_mut().find(|(id, _)| *id == node) {
            Some(entry) => entry.1 = root_margin,
            None => self.observed.push((node, root_margin)),
        }
    }

    pub(crate) fn unobserve(&mut self, node: NodeId) {
        self.observed.retain(|(id, _)| *id != node);
    }

    pub(crate) fn contains(&self, node: NodeId) -> bool {
        self.observed.iter().any(|(id, _)| *id == node)
    }

    pub(crate) fn len(&self) -> usize {
        self.observed.len()
    }

    /// Observed, connected elements within their margin of every clip box
    ///
    /// The margin extends the viewport and each enclosing scroll container
    /// alike, so elements just past the bottom of a scrolled list are
    /// reported before they scroll into view.
    pub(crate) fn intersecting(&self, doc: &MemoryDocument) -> Vec<NodeId> {
        let viewport_height = doc.viewport_height();
        self.observed
            .iter()
            .filter(|(node, margin)| {
                if !doc.is_connected(*node) {
                    return false;
                }
                let rect = doc.bounding_rect(node);
                let viewport = Rect::new(0.0, 0.0, rect.width, viewport_height);
                within(&rect, &viewport, *margin)
                    && doc
                        .clip_rects(*node)
                        .iter()
                        .all(|clip| within(&rect, clip, *margin))
            })
            .map(|(node, _)| *node)
            .collect()
    }
}

fn within(rect: &Rect, clip: &Rect, margin: f32) -> bool {
    let expanded = clip.expand_vertical(margin);
    rect.overlaps_band(expanded.top(), expanded.bottom())
}
