// src/events.rs

//! Event payloads and subscriber lists.

use crate::region::{GestureKind, RegionHandle};
use glam::{Vec2, Vec3};
use std::fmt;
use uuid::Uuid;

/// Identifies the pointer (interactor) that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractorId(Uuid);

impl InteractorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for InteractorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InteractorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stage of a classified gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Start,
    Update,
    End,
}

/// Payload of a tap, delivered to the region the contact started on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEventArgs {
    pub interactor: InteractorId,
    pub region: RegionHandle,
    /// Last contact point in world space.
    pub point: Vec3,
    /// `point` in the receiving region's surface coordinates.
    pub position: Vec2,
    /// Seconds between engagement and release.
    pub duration: f32,
}

/// Payload of one gesture step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEventArgs {
    pub interactor: InteractorId,
    /// Region whose contact was classified as a gesture.
    pub origin: RegionHandle,
    /// Region receiving this event; differs from `origin` after fallback.
    pub region: RegionHandle,
    pub kind: GestureKind,
    pub phase: GesturePhase,
    pub point: Vec3,
    pub start_point: Vec3,
    /// Movement since the previous gesture event. Zero on `Start` and `End`.
    pub delta: Vec3,
    /// `point` in the receiving region's surface coordinates.
    pub position: Vec2,
    /// `start_point` in the receiving region's surface coordinates.
    pub start_position: Vec2,
    /// Seconds since engagement.
    pub elapsed: f32,
}

/// Whether a region entered or left hover range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverPhase {
    Entered,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverEventArgs {
    pub interactor: InteractorId,
    pub region: RegionHandle,
    pub phase: HoverPhase,
}

/// Proof of a subscription. Hand it back to [`EventSubscribers::unsubscribe`]
/// to remove the callback; it cannot be cloned.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// Ordered list of callbacks for one event type.
///
/// Callbacks run in registration order.
pub struct EventSubscribers<T> {
    next_id: u64,
    handlers: Vec<(u64, Box<dyn FnMut(&T)>)>,
}

impl<T> EventSubscribers<T> {
    pub fn new() -> Self {
        Self { next_id: 0, handlers: Vec::new() }
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionToken
    where
        F: FnMut(&T) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        SubscriptionToken(id)
    }

    /// Returns `false` if the token belongs to another list or was already cleared.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _)| *id != token.0);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, event: &T) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<T> Default for EventSubscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventSubscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSubscribers").field("len", &self.handlers.len()).finish()
    }
}
