//! Deferred image loading
//!
//! Images are created with their real URL parked in `data-src` and are
//! handed to the document's intersection reporting. When the document
//! reports one within the margin, [`LazyImageLoader::activate`] moves the
//! URL into `src`. Documents that cannot report intersections get `src`
//! immediately.

use studio_platform::Document;

use crate::markup::{DEFERRED_SRC_ATTR, IMAGE_CLASS, IMAGE_PENDING_CLASS};

/// Tracks images still waiting for their real source
#[derive(Debug)]
pub struct LazyImageLoader<N> {
    root_margin: f32,
    pending: Vec<N>,
}

impl<N: Clone + PartialEq> LazyImageLoader<N> {
    pub fn new(root_margin: f32) -> Self {
        Self {
            root_margin,
            pending: Vec::new(),
        }
    }

    pub fn root_margin(&self) -> f32 {
        self.root_margin
    }

    /// Create a detached image for `source_url`
    pub fn create_deferred_image<D>(&mut self, dom: &mut D, source_url: &str) -> N
    where
        D: Document<Node = N>,
    {
        let image = dom.create_element("img");
        dom.add_class(&image, IMAGE_CLASS);

        if dom.supports_intersection() {
            dom.set_attribute(&image, DEFERRED_SRC_ATTR, source_url);
            dom.add_class(&image, IMAGE_PENDING_CLASS);
            dom.observe_intersection(&image, self.root_margin);
            self.pending.push(image.clone());
        } else {
            dom.set_attribute(&image, "src", source_url);
        }

        image
    }

    /// Assign the real source of every pending image in `intersecting`
    ///
    /// Each image is activated at most once; elements that are not pending
    /// (already activated, or never deferred) are skipped. Returns the
    /// number of images activated.
    pub fn activate<D>(&mut self, dom: &mut D, intersecting: &[N]) -> usize
    where
        D: Document<Node = N>,
    {
        let mut activated = 0;

        for image in intersecting {
            let Some(index) = self.pending.iter().position(|p| p == image) else {
                continue;
            };
            self.pending.swap_remove(index);
            dom.unobserve_intersection(image);

            if let Some(url) = dom.attribute(image, DEFERRED_SRC_ATTR) {
                dom.set_attribute(image, "src", &url);
                dom.remove_attribute(image, DEFERRED_SRC_ATTR);
            }
            dom.remove_class(image, IMAGE_PENDING_CLASS);
            activated += 1;
        }

        if activated > 0 {
            tracing::debug!(
                activated,
                pending = self.pending.len(),
                "activated lazy images"
            );
        }
        activated
    }

    /// Number of images still waiting for their source
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, image: &N) -> bool {
        self.pending.contains(image)
    }
}
