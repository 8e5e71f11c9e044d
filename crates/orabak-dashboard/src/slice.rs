//! Single-owner state cells for backend-derived data
//!
//! A [`Slice`] holds one piece of backend state (health, scheduler status,
//! strategies, statistics). Every fetch takes a [`Ticket`] before it goes out;
//! only the response carrying the newest ticket may be stored, so a slow
//! response can never overwrite a newer one. Failures keep whatever value was
//! there before.

use chrono::{DateTime, Utc};
use orabak_core::Result;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Sequence number handed out when a fetch starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The value was replaced wholesale
    Stored,
    /// The fetch failed; the previous value was kept
    Failed,
    /// A newer fetch was issued; this response was discarded
    Superseded,
    /// The owner was shut down; this response was discarded
    Closed,
}

#[derive(Debug)]
struct SliceInner<T> {
    value: Option<T>,
    issued: u64,
    pending: usize,
    last_error: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
    generation: u64,
    closed: bool,
}

/// Shared handle to one slice of state. Clones point at the same cell.
#[derive(Debug)]
pub struct Slice<T> {
    name: &'static str,
    inner: Arc<RwLock<SliceInner<T>>>,
}

impl<T> Clone for Slice<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Slice<T> {
    /// Empty slice: reads as absent until the first successful load
    pub fn new(name: &'static str) -> Self {
        Self::build(name, None)
    }

    /// Slice that reads as `initial` until the first successful load
    pub fn with_default(name: &'static str, initial: T) -> Self {
        Self::build(name, Some(initial))
    }

    fn build(name: &'static str, value: Option<T>) -> Self {
        Self {
            name,
            inner: Arc::new(RwLock::new(SliceInner {
                value,
                issued: 0,
                pending: 0,
                last_error: None,
                loaded_at: None,
                generation: 0,
                closed: false,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SliceInner<T>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SliceInner<T>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value, cloned
    pub fn get(&self) -> Option<T> {
        self.read().value.clone()
    }

    /// Whether any fetch is still outstanding
    pub fn is_loading(&self) -> bool {
        self.read().pending > 0
    }

    /// Error from the most recent failed fetch, cleared by the next success
    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.read().loaded_at
    }

    /// Bumped on every observable change
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// Issue a ticket for a fetch that is about to start
    pub fn begin(&self) -> Ticket {
        let mut inner = self.write();
        inner.issued += 1;
        inner.pending += 1;
        inner.generation += 1;
        Ticket(inner.issued)
    }

    /// Settle the fetch identified by `ticket`
    pub fn apply(&self, ticket: Ticket, result: Result<T>) -> Applied {
        let mut inner = self.write();
        inner.pending = inner.pending.saturating_sub(1);
        inner.generation += 1;

        if inner.closed {
            return Applied::Closed;
        }
        if ticket.0 != inner.issued {
            tracing::debug!(
                "Discarding superseded {} response (ticket {}, latest {})",
                self.name,
                ticket.0,
                inner.issued
            );
            return Applied::Superseded;
        }

        match result {
            Ok(value) => {
                inner.value = Some(value);
                inner.last_error = None;
                inner.loaded_at = Some(Utc::now());
                Applied::Stored
            }
            Err(e) => {
                inner.last_error = Some(e.to_string());
                Applied::Failed
            }
        }
    }

    /// Stop accepting responses. Values already stored stay readable.
    pub fn close(&self) {
        let mut inner = self.write();
        inner.closed = true;
        inner.generation += 1;
    }

    pub fn is_closed(&self) -> bool {
        self.read().closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orabak_core::OrabakError;

    fn transport(msg: &str) -> OrabakError {
        OrabakError::Transport(msg.to_string())
    }

    #[test]
    fn test_new_slice_is_absent() {
        let slice: Slice<u32> = Slice::new("health");
        assert_eq!(slice.get(), None);
        assert!(!slice.is_loading());
        assert_eq!(slice.name(), "health");
    }

    #[test]
    fn test_default_value_until_first_load() {
        let slice = Slice::with_default("status", 0u32);
        assert_eq!(slice.get(), Some(0));

        let ticket = slice.begin();
        assert!(slice.is_loading());
        assert_eq!(slice.apply(ticket, Ok(3)), Applied::Stored);
        assert_eq!(slice.get(), Some(3));
        assert!(!slice.is_loading());
        assert!(slice.loaded_at().is_some());
    }

    #[test]
    fn test_failure_keeps_previous_value() {
        let slice = Slice::new("health");
        let first = slice.begin();
        slice.apply(first, Ok("connected"));

        let second = slice.begin();
        assert_eq!(slice.apply(second, Err(transport("refused"))), Applied::Failed);
        assert_eq!(slice.get(), Some("connected"));
        assert!(slice.last_error().unwrap().contains("refused"));

        let third = slice.begin();
        slice.apply(third, Ok("disconnected"));
        assert_eq!(slice.last_error(), None);
    }

    #[test]
    fn test_failure_on_never_loaded_slice_stays_absent() {
        let slice: Slice<u32> = Slice::new("database");
        let ticket = slice.begin();
        assert_eq!(slice.apply(ticket, Err(transport("timeout"))), Applied::Failed);
        assert_eq!(slice.get(), None);
    }

    #[test]
    fn test_late_response_is_superseded() {
        let slice = Slice::new("health");
        let old = slice.begin();
        let new = slice.begin();

        assert_eq!(slice.apply(new, Ok("new")), Applied::Stored);
        assert_eq!(slice.apply(old, Ok("old")), Applied::Superseded);
        assert_eq!(slice.get(), Some("new"));
        assert!(!slice.is_loading());
    }

    #[test]
    fn test_late_failure_does_not_record_error() {
        let slice = Slice::new("health");
        let old = slice.begin();
        let new = slice.begin();
        slice.apply(new, Ok(1));
        assert_eq!(slice.apply(old, Err(transport("late"))), Applied::Superseded);
        assert_eq!(slice.last_error(), None);
    }

    #[test]
    fn test_closed_slice_discards_responses() {
        let slice = Slice::new("statistics");
        let ticket = slice.begin();
        slice.close();
        assert_eq!(slice.apply(ticket, Ok(5)), Applied::Closed);
        assert_eq!(slice.get(), None);
        assert!(slice.is_closed());
    }

    #[test]
    fn test_generation_moves_on_every_change() {
        let slice = Slice::new("health");
        let g0 = slice.generation();
        let ticket = slice.begin();
        let g1 = slice.generation();
        slice.apply(ticket, Ok(1));
        assert!(g1 > g0);
        assert!(slice.generation() > g1);
    }
}
