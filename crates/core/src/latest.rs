//! Latest-wins request tracking.
//!
//! Each fetch is issued a [`RequestId`]. A result may be applied only if its id
//! is still the newest one issued; anything older is stale and dropped. When a
//! handle to the in-flight task is registered, issuing a newer request cancels it.

use tokio::task::AbortHandle;
use tracing::debug;

/// Something that can stop an in-flight request.
pub trait Cancel {
    fn cancel(self);
}

impl Cancel for AbortHandle {
    fn cancel(self) {
        self.abort();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Single-slot "newest request wins" cell.
pub struct LatestWins<H: Cancel = AbortHandle> {
    issued: u64,
    in_flight: Option<(RequestId, H)>,
}

impl<H: Cancel> Default for LatestWins<H> {
    fn default() -> Self {
        Self { issued: 0, in_flight: None }
    }
}

impl<H: Cancel> std::fmt::Debug for LatestWins<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatestWins")
            .field("issued", &self.issued)
            .field("in_flight", &self.in_flight.as_ref().map(|(id, _)| id))
            .finish()
    }
}

impl<H: Cancel> LatestWins<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request id, cancelling whatever is in flight.
    pub fn issue(&mut self) -> RequestId {
        self.issued += 1;
        self.cancel_in_flight();
        RequestId(self.issued)
    }

    /// Register the task serving `id`. A handle for a stale id is cancelled
    /// straight away.
    pub fn track(&mut self, id: RequestId, handle: H) {
        if !self.is_latest(id) {
            handle.cancel();
            return;
        }
        self.cancel_in_flight();
        self.in_flight = Some((id, handle));
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        id.0 == self.issued
    }

    /// Claim the right to apply the result of `id`. Returns `false` for stale ids.
    pub fn accept(&mut self, id: RequestId) -> bool {
        if !self.is_latest(id) {
            debug!(id = id.0, latest = self.issued, "Dropping stale response");
            return false;
        }
        if matches!(self.in_flight, Some((tracked, _)) if tracked == id) {
            self.in_flight = None;
        }
        true
    }

    /// Whether the newest issued request is still running.
    pub fn is_pending(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|(id, _)| self.is_latest(*id))
    }

    /// Make every issued id stale, e.g. when the input is cleared.
    pub fn invalidate(&mut self) {
        self.issued += 1;
        self.cancel_in_flight();
    }

    fn cancel_in_flight(&mut self) {
        if let Some((id, handle)) = self.in_flight.take() {
            debug!(id = id.0, "Cancelling superseded request");
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records which ids were cancelled.
    struct Probe(u64, Rc<RefCell<Vec<u64>>>);

    impl Cancel for Probe {
        fn cancel(self) {
            self.1.borrow_mut().push(self.0);
        }
    }

    #[test]
    fn later_issue_makes_earlier_stale() {
        let mut cell: LatestWins<Probe> = LatestWins::new();
        let a = cell.issue();
        let b = cell.issue();
        // B resolves first, then A
        assert!(cell.accept(b));
        assert!(!cell.accept(a));
    }

    #[test]
    fn issuing_cancels_tracked_request() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let mut cell = LatestWins::new();
        let a = cell.issue();
        cell.track(a, Probe(a.get(), cancelled.clone()));
        assert!(cell.is_pending());
        let b = cell.issue();
        cell.track(b, Probe(b.get(), cancelled.clone()));
        assert_eq!(*cancelled.borrow(), vec![a.get()]);
        assert!(cell.accept(b));
        assert!(!cell.is_pending());
    }

    #[test]
    fn tracking_a_stale_id_cancels_immediately() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let mut cell = LatestWins::new();
        let a = cell.issue();
        let _b = cell.issue();
        cell.track(a, Probe(a.get(), cancelled.clone()));
        assert_eq!(*cancelled.borrow(), vec![a.get()]);
        assert!(!cell.is_pending());
    }

    #[test]
    fn invalidate_rejects_everything_outstanding() {
        let mut cell: LatestWins<Probe> = LatestWins::new();
        let a = cell.issue();
        cell.invalidate();
        assert!(!cell.accept(a));
        let b = cell.issue();
        assert!(cell.accept(b));
    }
}
