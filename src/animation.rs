//! Animation batches and completion tracking.
//!
//! DESIGN
//! ======
//! Every group of concurrently running effects is a batch. The renderer
//! receives one [`AnimationTicket`] per effect and hands it back through
//! [`crate::board::Board::animation_complete`] when the effect finishes.
//! Each batch owns its own completion counter, so a late ticket from an
//! old batch can never complete a newer one.
//!
//! Starting a new position transition supersedes any transition still in
//! flight: the old batch keeps counting its tickets but settles as
//! [`Completion::Superseded`], and the board ignores it. The board also
//! supersedes running transitions whenever it commits a position without
//! animating it (instant updates, resolved drags).

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Identifier of one animation batch.
pub type BatchId = u64;

/// Handle for one running effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationTicket {
    pub batch: BatchId,
    pub index: usize,
}

/// What a batch is animating.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchKind {
    /// A position change driven by `set_position` and friends.
    Transition { old: Position, new: Position },
    /// The dragged piece settling after a drop, snapback or trash.
    Settle,
}

/// Result of reporting a finished ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The batch still has effects running.
    Pending,
    /// Every effect of the batch has finished.
    Settled(BatchKind),
    /// Every effect finished, but a newer transition replaced this one.
    Superseded,
    /// Unknown batch, or a ticket already reported.
    Ignored,
}

#[derive(Debug)]
struct Batch {
    kind: BatchKind,
    finished: Vec<bool>,
    remaining: usize,
    superseded: bool,
}

/// Tracks every batch still in flight.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: BatchId,
    batches: HashMap<BatchId, Batch>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a batch of `count` effects and return their tickets.
    ///
    /// An empty batch is never registered: the caller settles it on the
    /// spot, which is what `Settled` would have meant anyway.
    pub fn start(&mut self, kind: BatchKind, count: usize) -> Vec<AnimationTicket> {
        if count == 0 {
            return Vec::new();
        }
        if matches!(kind, BatchKind::Transition { .. }) {
            self.supersede_transitions();
        }

        self.next_id += 1;
        let id = self.next_id;
        self.batches.insert(id, Batch { kind, finished: vec![false; count], remaining: count, superseded: false });
        tracing::debug!(batch = id, count, "animation batch started");
        (0..count).map(|index| AnimationTicket { batch: id, index }).collect()
    }

    /// Record that the effect behind `ticket` finished.
    pub fn complete(&mut self, ticket: AnimationTicket) -> Completion {
        let Some(batch) = self.batches.get_mut(&ticket.batch) else {
            return Completion::Ignored;
        };
        match batch.finished.get_mut(ticket.index) {
            Some(done) if !*done => *done = true,
            _ => return Completion::Ignored,
        }
        batch.remaining -= 1;
        if batch.remaining > 0 {
            return Completion::Pending;
        }

        let Some(batch) = self.batches.remove(&ticket.batch) else {
            return Completion::Ignored;
        };
        tracing::debug!(batch = ticket.batch, superseded = batch.superseded, "animation batch settled");
        if batch.superseded {
            Completion::Superseded
        } else {
            Completion::Settled(batch.kind)
        }
    }

    /// Number of batches still running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.batches.len()
    }

    /// Whether a non-superseded transition is still running.
    #[must_use]
    pub fn transition_running(&self) -> bool {
        self.batches
            .values()
            .any(|b| !b.superseded && matches!(b.kind, BatchKind::Transition { .. }))
    }

    /// Mark every running transition as superseded. Their tickets still
    /// count, but they settle as [`Completion::Superseded`].
    pub fn supersede_transitions(&mut self) {
        for batch in self.batches.values_mut() {
            if matches!(batch.kind, BatchKind::Transition { .. }) {
                batch.superseded = true;
            }
        }
    }

    /// Drop every batch; later tickets are ignored.
    pub fn abandon(&mut self) {
        self.batches.clear();
    }
}
