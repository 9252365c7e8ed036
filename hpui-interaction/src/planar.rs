// src/planar.rs

//! A flat rectangular region.

use crate::dispatch::DispatchContext;
use crate::events::{EventSubscribers, GestureEventArgs, SubscriptionToken, TapEventArgs};
use crate::region::{GestureKind, Region};
use glam::{Vec2, Vec3};
use hpui_core::SurfaceRect;
use std::collections::BTreeSet;
use std::fmt;

/// Rectangle on a plane that forwards its callbacks to subscribers.
///
/// ```
/// use hpui_interaction::{GestureKind, PlanarRegion};
/// use hpui_core::{SurfaceRect, Vec2, Vec3};
///
/// let panel = PlanarRegion::new("panel", SurfaceRect::axis_aligned(Vec3::ZERO, Vec2::splat(0.05)))
///     .with_z_order(1)
///     .with_gestures(&[GestureKind::Swipe]);
/// assert_eq!(panel.z_order(), 1);
/// assert!(panel.accepts(GestureKind::Swipe));
/// ```
pub struct PlanarRegion {
    name: String,
    z_order: i32,
    surface: SurfaceRect,
    gestures: BTreeSet<GestureKind>,
    tap_event: EventSubscribers<TapEventArgs>,
    gesture_event: EventSubscribers<GestureEventArgs>,
}

impl PlanarRegion {
    pub fn new(name: impl Into<String>, surface: SurfaceRect) -> Self {
        Self {
            name: name.into(),
            z_order: 0,
            surface,
            gestures: BTreeSet::new(),
            tap_event: EventSubscribers::new(),
            gesture_event: EventSubscribers::new(),
        }
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    pub fn with_gestures(mut self, kinds: &[GestureKind]) -> Self {
        self.gestures.extend(kinds.iter().copied());
        self
    }

    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    /// Takes effect from the next frame's priority resolution.
    pub fn set_z_order(&mut self, z_order: i32) {
        self.z_order = z_order;
    }

    pub fn surface(&self) -> &SurfaceRect {
        &self.surface
    }

    pub fn set_surface(&mut self, surface: SurfaceRect) {
        self.surface = surface;
    }

    pub fn accepts(&self, kind: GestureKind) -> bool {
        self.gestures.contains(&kind)
    }

    pub fn set_gesture(&mut self, kind: GestureKind, accepted: bool) {
        if accepted {
            self.gestures.insert(kind);
        } else {
            self.gestures.remove(&kind);
        }
    }

    pub fn subscribe_tap<F: FnMut(&TapEventArgs) + 'static>(&mut self, handler: F) -> SubscriptionToken {
        self.tap_event.subscribe(handler)
    }

    pub fn unsubscribe_tap(&mut self, token: SubscriptionToken) -> bool {
        self.tap_event.unsubscribe(token)
    }

    pub fn subscribe_gesture<F: FnMut(&GestureEventArgs) + 'static>(&mut self, handler: F) -> SubscriptionToken {
        self.gesture_event.subscribe(handler)
    }

    pub fn unsubscribe_gesture(&mut self, token: SubscriptionToken) -> bool {
        self.gesture_event.unsubscribe(token)
    }
}

impl Region for PlanarRegion {
    fn z_order(&self) -> i32 {
        self.z_order
    }

    fn surface_coordinates(&self, point: Vec3) -> Vec2 {
        self.surface.normalized_coordinates(point)
    }

    fn handles_gesture(&self, kind: GestureKind) -> bool {
        self.accepts(kind)
    }

    fn on_tap(&mut self, args: TapEventArgs, _ctx: &mut DispatchContext<'_>) {
        self.tap_event.emit(&args);
    }

    fn on_gesture(&mut self, args: GestureEventArgs, _ctx: &mut DispatchContext<'_>) {
        self.gesture_event.emit(&args);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for PlanarRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanarRegion")
            .field("name", &self.name)
            .field("z_order", &self.z_order)
            .field("surface", &self.surface)
            .field("gestures", &self.gestures)
            .finish()
    }
}
