//! Shared fixtures for unit tests.

use crate::dispatch::DispatchContext;
use crate::events::{GestureEventArgs, GesturePhase, TapEventArgs};
use crate::region::{GestureKind, Region, RegionHandle, RegionRegistry};
use glam::{Vec2, Vec3};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// `N` distinct live handles. Only their identity is meaningful.
pub fn handles<const N: usize>() -> [RegionHandle; N] {
    let mut registry = RegionRegistry::new();
    std::array::from_fn(|i| registry.insert(Box::new(RecordingRegion::new(&format!("r{}", i), 0))))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Received {
    Tap(TapEventArgs),
    Gesture(GestureEventArgs),
}

/// Every callback seen, tagged with the receiving region's name.
pub type Journal = Rc<RefCell<Vec<(String, Received)>>>;

pub struct RecordingRegion {
    name: String,
    z_order: i32,
    gestures: BTreeSet<GestureKind>,
    journal: Journal,
    release_on_gesture_start: bool,
}

impl RecordingRegion {
    pub fn new(name: &str, z_order: i32) -> Self {
        Self {
            name: name.to_string(),
            z_order,
            gestures: BTreeSet::new(),
            journal: Journal::default(),
            release_on_gesture_start: false,
        }
    }

    pub fn with_gestures(mut self, kinds: &[GestureKind]) -> Self {
        self.gestures.extend(kinds.iter().copied());
        self
    }

    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = Rc::clone(journal);
        self
    }

    /// Asks the engine to release the originating contact as soon as a gesture starts.
    pub fn releasing_on_gesture_start(mut self) -> Self {
        self.release_on_gesture_start = true;
        self
    }
}

impl Region for RecordingRegion {
    fn z_order(&self) -> i32 {
        self.z_order
    }

    fn surface_coordinates(&self, point: Vec3) -> Vec2 {
        Vec2::new(point.x, point.y)
    }

    fn handles_gesture(&self, kind: GestureKind) -> bool {
        self.gestures.contains(&kind)
    }

    fn on_tap(&mut self, args: TapEventArgs, _ctx: &mut DispatchContext<'_>) {
        self.journal.borrow_mut().push((self.name.clone(), Received::Tap(args)));
    }

    fn on_gesture(&mut self, args: GestureEventArgs, ctx: &mut DispatchContext<'_>) {
        self.journal.borrow_mut().push((self.name.clone(), Received::Gesture(args)));
        if self.release_on_gesture_start && args.phase == GesturePhase::Start {
            ctx.request_release(args.origin);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
