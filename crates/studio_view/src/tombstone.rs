//! Placeholder cards
//!
//! Before a page is requested the list is padded with empty cards
//! ("tombstones") so layout does not jump when results arrive. Results
//! fill the oldest tombstones first; whatever is left over once a page is
//! rendered gets removed.

use std::collections::VecDeque;

use studio_listing::ItemRecord;
use studio_platform::Document;

use crate::config::ViewConfig;
use crate::lazy_image::LazyImageLoader;
use crate::markup::{
    AUTHOR_CLASS, CARD_CLASS, ID_ATTR, THUMBNAIL_CLASS, TITLE_CLASS, TOMBSTONE_CLASS,
};

/// An unpopulated card and its slots
#[derive(Clone, Debug)]
pub struct Tombstone<N> {
    card: N,
    thumbnail: N,
    title: N,
    author: N,
}

impl<N> Tombstone<N> {
    pub fn card(&self) -> &N {
        &self.card
    }
}

/// FIFO of tombstones attached to the list but not yet populated
#[derive(Debug)]
pub struct TombstonePool<N> {
    unused: VecDeque<Tombstone<N>>,
    populated: usize,
}

impl<N> Default for TombstonePool<N> {
    fn default() -> Self {
        Self {
            unused: VecDeque::new(),
            populated: 0,
        }
    }
}

impl<N: Clone + PartialEq> TombstonePool<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a detached tombstone
    ///
    /// ```text
    /// a.studioview-project.studioview-tombstone
    ///   div.studioview-thumbnail
    ///   div.studioview-title
    ///   div.studioview-author
    /// ```
    pub fn create_placeholder<D>(dom: &mut D) -> Tombstone<N>
    where
        D: Document<Node = N>,
    {
        let card = dom.create_element("a");
        dom.add_class(&card, CARD_CLASS);
        dom.add_class(&card, TOMBSTONE_CLASS);

        let mut slot = |class: &str| {
            let element = dom.create_element("div");
            dom.add_class(&element, class);
            dom.append_child(&card, &element);
            element
        };
        let thumbnail = slot(THUMBNAIL_CLASS);
        let title = slot(TITLE_CLASS);
        let author = slot(AUTHOR_CLASS);

        Tombstone {
            card,
            thumbnail,
            title,
            author,
        }
    }

    /// Append `count` tombstones to `list` and queue them
    pub fn add_placeholders<D>(&mut self, dom: &mut D, list: &N, count: usize)
    where
        D: Document<Node = N>,
    {
        for _ in 0..count {
            let tombstone = Self::create_placeholder(dom);
            dom.append_child(list, &tombstone.card);
            self.unused.push_back(tombstone);
        }
        tracing::trace!(added = count, unused = self.unused.len(), "placeholders");
    }

    /// Fill the oldest tombstone with `record`, creating one if none is left
    ///
    /// A dequeued tombstone is never handed out again. Returns the card.
    pub fn populate_next<D>(
        &mut self,
        dom: &mut D,
        list: &N,
        images: &mut LazyImageLoader<N>,
        record: &ItemRecord,
        config: &ViewConfig,
    ) -> N
    where
        D: Document<Node = N>,
    {
        let tombstone = match self.unused.pop_front() {
            Some(tombstone) => tombstone,
            None => {
                let tombstone = Self::create_placeholder(dom);
                dom.append_child(list, &tombstone.card);
                tombstone
            }
        };

        let Tombstone {
            card,
            thumbnail,
            title,
            author,
        } = tombstone;

        dom.set_attribute(&card, ID_ATTR, &record.id);
        dom.set_attribute(&card, "href", &config.item_url.expand_id(&record.id));
        dom.set_attribute(&card, "target", &config.link_target);
        dom.set_attribute(&card, "title", &record.title);

        let thumbnail_url = config.thumbnail_url.expand_id(&record.id);
        let image = images.create_deferred_image(dom, &thumbnail_url);
        dom.append_child(&thumbnail, &image);
        dom.set_text(&title, &record.title);
        dom.set_text(&author, &record.author);

        dom.remove_class(&card, TOMBSTONE_CLASS);
        self.populated += 1;
        card
    }

    /// Remove every queued tombstone from the document
    ///
    /// Returns how many were removed.
    pub fn cleanup_unused<D>(&mut self, dom: &mut D) -> usize
    where
        D: Document<Node = N>,
    {
        let removed = self.unused.len();
        for tombstone in self.unused.drain(..) {
            dom.remove(&tombstone.card);
        }
        if removed > 0 {
            tracing::debug!(removed, "removed unused placeholders");
        }
        removed
    }

    /// Tombstones attached but not populated
    pub fn unused(&self) -> usize {
        self.unused.len()
    }

    /// Cards populated so far
    pub fn populated(&self) -> usize {
        self.populated
    }
}
