//! Is an element on screen?

use studio_platform::Document;

/// Whether `element` is vertically visible
///
/// The element's border box has to touch the viewport band
/// `[0, viewport_height]` and the box of every ancestor from its parent up
/// to and including `boundary`. Ancestors above `boundary` are not
/// consulted. Edges are inclusive. Horizontal position is ignored.
pub fn is_visible<D: Document>(dom: &D, element: &D::Node, boundary: &D::Node) -> bool {
    let rect = dom.bounding_rect(element);
    if !rect.overlaps_band(0.0, dom.viewport_height()) {
        return false;
    }

    let mut current = dom.parent(element);
    while let Some(ancestor) = current {
        let clip = dom.bounding_rect(&ancestor);
        if !rect.overlaps_band(clip.top(), clip.bottom()) {
            return false;
        }
        if ancestor == *boundary {
            break;
        }
        current = dom.parent(&ancestor);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_platform_headless::{MemoryDocument, NodeId};

    /// body > scroller(200px, clipping) > list > 5 rows of 100px
    fn nested(viewport: f32) -> (MemoryDocument, NodeId, NodeId, Vec<NodeId>) {
        let mut dom = MemoryDocument::new(800.0, viewport);
        dom.set_class_height("row", 100.0);

        let body = dom.body();
        let scroller = dom.create_element("div");
        let list = dom.create_element("div");
        dom.append_child(&body, &scroller);
        dom.append_child(&scroller, &list);
        dom.set_scroll_container(scroller, 200.0);

        let rows = (0..5)
            .map(|_| {
                let row = dom.create_element("div");
                dom.add_class(&row, "row");
                dom.append_child(&list, &row);
                row
            })
            .collect();

        (dom, scroller, list, rows)
    }

    #[test]
    fn test_first_row_visible() {
        let (dom, scroller, _, rows) = nested(600.0);
        assert!(is_visible(&dom, &rows[0], &scroller));
    }

    #[test]
    fn test_clipped_by_scrolling_ancestor() {
        let (dom, scroller, _, rows) = nested(600.0);
        let last = rows[4];

        // Inside the 600px viewport, but below the 200px scroller
        assert!(dom.bounding_rect(&last).bottom() <= 600.0);
        assert!(!is_visible(&dom, &last, &scroller));
    }

    #[test]
    fn test_scrolling_reveals() {
        let (mut dom, scroller, _, rows) = nested(600.0);
        dom.scroll_to_end(scroller);
        assert!(is_visible(&dom, &rows[4], &scroller));
        assert!(!is_visible(&dom, &rows[0], &scroller));
    }

    #[test]
    fn test_touching_edge_counts() {
        let (dom, scroller, _, rows) = nested(600.0);
        // Row 2 starts exactly at the scroller's bottom edge
        assert_eq!(dom.bounding_rect(&rows[2]).top(), 200.0);
        assert!(is_visible(&dom, &rows[2], &scroller));
        assert!(!is_visible(&dom, &rows[3], &scroller));
    }

    #[test]
    fn test_below_viewport() {
        let (mut dom, scroller, _, rows) = nested(150.0);
        dom.set_scroll_container(scroller, 1000.0);
        assert!(is_visible(&dom, &rows[1], &scroller));
        assert!(!is_visible(&dom, &rows[3], &scroller));
    }

    #[test]
    fn test_walk_stops_at_boundary() {
        let (dom, _, list, rows) = nested(600.0);
        // The clipping scroller sits above the boundary, so only the
        // viewport and the list itself are checked.
        assert!(is_visible(&dom, &rows[4], &list));
    }
}
