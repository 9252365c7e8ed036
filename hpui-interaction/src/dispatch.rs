//! Deferred requests raised from inside region callbacks.
//!
//! Callbacks run while the engine is iterating the frame's contacts, so they
//! cannot change engine state directly. They queue [`DeferredCommand`]s
//! through a [`DispatchContext`]; the engine applies the queue at the start of
//! the next update.

use crate::events::InteractorId;
use crate::region::RegionHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredCommand {
    /// End the contact on this region as if the pointer had lifted, and keep
    /// it from re-engaging until it leaves the selection radius.
    Release(RegionHandle),
}

/// Handed to [`crate::region::Region`] callbacks for the duration of one call.
#[derive(Debug)]
pub struct DispatchContext<'a> {
    interactor: InteractorId,
    queue: &'a mut Vec<DeferredCommand>,
}

impl<'a> DispatchContext<'a> {
    pub(crate) fn new(interactor: InteractorId, queue: &'a mut Vec<DeferredCommand>) -> Self {
        Self { interactor, queue }
    }

    /// The pointer that produced the event being handled.
    pub fn interactor(&self) -> InteractorId {
        self.interactor
    }

    /// Queues the release of `region`'s contact for the next frame.
    pub fn request_release(&mut self, region: RegionHandle) {
        tracing::trace!("DispatchContext: release of {} deferred to next frame", region);
        self.queue.push(DeferredCommand::Release(region));
    }

    pub fn pending(&self) -> &[DeferredCommand] {
        self.queue
    }
}
