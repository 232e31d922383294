//! Host notifications
//!
//! The gallery reports what happened through [`ViewEvent`]s delivered to
//! every subscribed callback, in subscription order.
//!
//! Callbacks run synchronously inside the view operation that raised the
//! event, so they must not call back into the view. Hosts that need to
//! react with another view call queue the work instead.

/// Something the host may want to react to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    /// A populated card was clicked or activated from the keyboard
    Selected { id: String },
    /// A page request completed and its records were rendered
    PageLoaded { page: u32, items: usize },
    /// The listing has no further pages; raised once
    Ended,
}

/// Handle returned by [`Listeners::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&ViewEvent)>;

/// Registry of event callbacks
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every event
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ViewEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Builder form of [`subscribe`](Self::subscribe)
    pub fn with<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ViewEvent) + 'static,
    {
        self.subscribe(callback);
        self
    }

    /// Remove a callback; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub(crate) fn emit(&mut self, event: &ViewEvent) {
        tracing::trace!(?event, listeners = self.subscribers.len(), "emit");
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
