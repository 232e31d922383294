//! Pagination state machine
//!
//! ```text
//!          Start              Continue
//!   Idle ---------> Loading ----------> Idle (page + 1)
//!                     |
//!                     |  End
//!                     +--------> Ended
//!                     |
//!                     |  Fail
//!                     +--------> Errored
//! ```
//!
//! `Ended` and `Errored` are terminal. Every other (state, event) pair is
//! rejected, which is what keeps at most one page request in flight.

use std::fmt;

use crate::error::{Result, ViewError};

/// Where the gallery is in its paging lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// Ready to request the current page
    #[default]
    Idle,
    /// A page request is outstanding
    Loading,
    /// The listing has no further pages
    Ended,
    /// A page request failed; no further pages will be requested
    Errored,
}

impl LoadState {
    /// Returns true if no further page will ever be requested
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Ended | LoadState::Errored)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Handle an event and return the new state, or None if no transition
    pub fn on_event(&self, event: LoadEvent) -> Option<Self> {
        match (self, event) {
            (LoadState::Idle, LoadEvent::Start) => Some(LoadState::Loading),
            (LoadState::Loading, LoadEvent::Continue) => Some(LoadState::Idle),
            (LoadState::Loading, LoadEvent::End) => Some(LoadState::Ended),
            (LoadState::Loading, LoadEvent::Fail) => Some(LoadState::Errored),
            _ => None,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ended => "ended",
            LoadState::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// Events driving [`LoadState`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadEvent {
    /// A page request is issued
    Start,
    /// The page arrived and the listing continues
    Continue,
    /// The page arrived and was the last one
    End,
    /// The request or its document failed
    Fail,
}

/// Current page number plus lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u32,
    state: LoadState,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationState {
    /// Pages are numbered from 1
    pub fn new() -> Self {
        Self {
            current_page: 1,
            state: LoadState::Idle,
        }
    }

    /// The page the next (or outstanding) request is for
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn can_load(&self) -> bool {
        self.state == LoadState::Idle
    }

    /// Apply `event`, failing with [`ViewError::InvalidState`] on a
    /// transition the machine does not have
    ///
    /// `Continue` advances the page number.
    pub fn apply(&mut self, event: LoadEvent, operation: &'static str) -> Result<LoadState> {
        let next = self
            .state
            .on_event(event)
            .ok_or(ViewError::InvalidState {
                operation,
                state: self.state,
            })?;

        if event == LoadEvent::Continue {
            self.current_page += 1;
        }

        tracing::trace!(from = %self.state, to = %next, page = self.current_page, "load state");
        self.state = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_advances_page() {
        let mut p = PaginationState::new();
        assert_eq!(p.current_page(), 1);
        assert!(p.can_load());

        p.apply(LoadEvent::Start, "load").unwrap();
        assert!(p.state().is_loading());
        assert!(!p.can_load());

        p.apply(LoadEvent::Continue, "finish").unwrap();
        assert_eq!(p.state(), LoadState::Idle);
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn test_end_keeps_page() {
        let mut p = PaginationState::new();
        p.apply(LoadEvent::Start, "load").unwrap();
        p.apply(LoadEvent::End, "finish").unwrap();
        assert_eq!(p.state(), LoadState::Ended);
        assert_eq!(p.current_page(), 1);
        assert!(p.state().is_terminal());
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for terminal in [LoadEvent::End, LoadEvent::Fail] {
            let mut p = PaginationState::new();
            p.apply(LoadEvent::Start, "load").unwrap();
            p.apply(terminal, "finish").unwrap();

            for event in [
                LoadEvent::Start,
                LoadEvent::Continue,
                LoadEvent::End,
                LoadEvent::Fail,
            ] {
                assert!(p.state().on_event(event).is_none());
            }
        }
    }

    #[test]
    fn test_double_start_is_invalid() {
        let mut p = PaginationState::new();
        p.apply(LoadEvent::Start, "load").unwrap();
        let err = p.apply(LoadEvent::Start, "load").unwrap_err();
        assert!(matches!(
            err,
            ViewError::InvalidState {
                operation: "load",
                state: LoadState::Loading
            }
        ));
        assert_eq!(err.to_string(), "cannot load while loading");
    }

    #[test]
    fn test_completion_without_request_is_invalid() {
        let mut p = PaginationState::new();
        assert!(p.apply(LoadEvent::Continue, "finish").is_err());
        assert_eq!(p.current_page(), 1);
    }
}
