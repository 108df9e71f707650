//! # Pending Operation Tracking
//!
//! Every manager operation that awaits the remote boundary runs in two
//! phases: it enters "pending" synchronously, and applies its mutation once
//! the call resolves. [`PendingGuard`] owns the first half. Dropping the
//! guard, on any exit path including a dropped future, takes the operation's
//! contribution back out of the loading flag.
//!
//! ```text
//!             enter()                 last guard dropped
//! Uninitialized ─────► Loading ◄──────────────────────► Ready
//!                        ▲  │            enter()
//!                        └──┘ more guards alive
//! ```

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifecycle of a manager's collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// Nothing requested yet.
    #[default]
    Uninitialized,
    /// At least one remote call is in flight.
    Loading,
    /// No call in flight.
    Ready,
}

/// Count of in-flight operations for one manager.
#[derive(Debug, Default)]
pub(crate) struct PendingCounter {
    in_flight: usize,
    phase: LoadPhase,
}

impl PendingCounter {
    fn enter(&mut self) {
        self.in_flight += 1;
        self.phase = LoadPhase::Loading;
    }

    fn leave(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.phase = LoadPhase::Ready;
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub(crate) fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Back to `Uninitialized`, keeping the count of calls still in flight.
    pub(crate) fn reset(&mut self) {
        if self.in_flight == 0 {
            self.phase = LoadPhase::Uninitialized;
        }
    }
}

/// State that carries a [`PendingCounter`].
pub(crate) trait TracksPending {
    fn counter(&mut self) -> &mut PendingCounter;

    /// Called after every enter/leave, with the lock held.
    fn pending_changed(&mut self) {}
}

/// Scoped "operation in flight" marker.
pub(crate) struct PendingGuard<'a, S: TracksPending> {
    state: &'a RwLock<S>,
}

impl<'a, S: TracksPending> PendingGuard<'a, S> {
    pub(crate) fn enter(state: &'a RwLock<S>) -> Self {
        {
            let mut guard = write(state);
            guard.counter().enter();
            guard.pending_changed();
        }
        PendingGuard { state }
    }
}

impl<S: TracksPending> Drop for PendingGuard<'_, S> {
    fn drop(&mut self) {
        let mut guard = write(self.state);
        guard.counter().leave();
        guard.pending_changed();
    }
}

pub(crate) fn read<S>(lock: &RwLock<S>) -> RwLockReadGuard<'_, S> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<S>(lock: &RwLock<S>) -> RwLockWriteGuard<'_, S> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
