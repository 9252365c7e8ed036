// src/replay.rs

//! Offline replay of recorded contact frames.
//!
//! A scenario is a TOML document with the interaction settings, a set of
//! planar regions and a list of timed frames. Each frame lists the regions
//! the pointer was near:
//!
//! ```toml
//! [interaction]
//! select_only_priority_target = false
//!
//! [[regions]]
//! name = "button"
//! z_order = 0
//! center = [0.0, 0.0, 0.0]
//! half_extents = [0.01, 0.01]
//!
//! [[frames]]
//! time = 0.0
//! contacts = [{ region = "button", distance = 0.002, point = [0.0, 0.0, 0.0] }]
//! ```

use crate::candidates::{CandidateSet, InteractionData};
use crate::clock::{FrameClock, ManualClock};
use crate::engine::InteractionContext;
use crate::error::InteractionError;
use crate::events::GesturePhase;
use crate::interactor::Interactor;
use crate::planar::PlanarRegion;
use crate::region::{GestureKind, RegionHandle, RegionRegistry};
use glam::{Vec2, Vec3};
use hpui_core::{InteractionConfig, SurfaceRect};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

fn region_name(names: &HashMap<RegionHandle, String>, handle: RegionHandle) -> String {
    names.get(&handle).cloned().unwrap_or_else(|| handle.to_string())
}

fn default_right() -> Vec3 {
    Vec3::X
}

fn default_forward() -> Vec3 {
    Vec3::Z
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionSpec {
    pub name: String,
    #[serde(default)]
    pub z_order: i32,
    pub center: Vec3,
    #[serde(default = "default_right")]
    pub right: Vec3,
    #[serde(default = "default_forward")]
    pub forward: Vec3,
    pub half_extents: Vec2,
    #[serde(default)]
    pub gestures: Vec<GestureKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactSpec {
    pub region: String,
    pub distance: f32,
    /// Defaults to `distance`.
    #[serde(default)]
    pub heuristic: Option<f32>,
    pub point: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameSpec {
    pub time: f64,
    #[serde(default)]
    pub contacts: Vec<ContactSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub regions: Vec<RegionSpec>,
    #[serde(default)]
    pub frames: Vec<FrameSpec>,
}

/// One event delivered during a replay.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    Tap {
        time: f64,
        region: String,
        position: Vec2,
        duration: f32,
    },
    Gesture {
        time: f64,
        origin: String,
        region: String,
        kind: GestureKind,
        phase: GesturePhase,
        position: Vec2,
        delta: Vec3,
    },
}

impl fmt::Display for ReplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayEvent::Tap { time, region, position, duration } => write!(
                f,
                "[{:>7.3}s] tap     {} at ({:.3}, {:.3}) after {:.3}s",
                time, region, position.x, position.y, duration
            ),
            ReplayEvent::Gesture { time, origin, region, kind, phase, position, delta } => {
                write!(
                    f,
                    "[{:>7.3}s] {} {:?} {} at ({:.3}, {:.3}) delta {:.4}",
                    time,
                    kind,
                    phase,
                    region,
                    position.x,
                    position.y,
                    delta.length()
                )?;
                if origin != region {
                    write!(f, " (from {})", origin)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub frames: usize,
    pub events: Vec<ReplayEvent>,
}

impl ReplayReport {
    pub fn tap_count(&self) -> usize {
        self.events.iter().filter(|event| matches!(event, ReplayEvent::Tap { .. })).count()
    }

    pub fn gesture_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, ReplayEvent::Gesture { phase: GesturePhase::Start, .. }))
            .count()
    }
}

impl Scenario {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, InteractionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| InteractionError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, InteractionError> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), InteractionError> {
        self.interaction.validate()?;

        let mut seen = HashSet::new();
        for region in &self.regions {
            if !seen.insert(region.name.as_str()) {
                return Err(InteractionError::Scenario(format!("duplicate region '{}'", region.name)));
            }
        }

        let mut previous = f64::NEG_INFINITY;
        for (index, frame) in self.frames.iter().enumerate() {
            if !frame.time.is_finite() || frame.time < previous {
                return Err(InteractionError::Scenario(format!(
                    "frame {} has time {} before the previous frame",
                    index, frame.time
                )));
            }
            previous = frame.time;
            for contact in &frame.contacts {
                if !seen.contains(contact.region.as_str()) {
                    return Err(InteractionError::Scenario(format!(
                        "frame {} references unknown region '{}'",
                        index, contact.region
                    )));
                }
            }
        }
        Ok(())
    }

    /// Drives an interactor through every frame with a manual clock.
    pub fn run(&self) -> Result<ReplayReport, InteractionError> {
        let mut regions = RegionRegistry::new();
        let mut handles: HashMap<String, RegionHandle> = HashMap::new();
        let mut names: HashMap<RegionHandle, String> = HashMap::new();
        for spec in &self.regions {
            let surface = SurfaceRect::new(spec.center, spec.right, spec.forward, spec.half_extents);
            let region = PlanarRegion::new(spec.name.clone(), surface)
                .with_z_order(spec.z_order)
                .with_gestures(&spec.gestures);
            let handle = regions.insert(Box::new(region));
            handles.insert(spec.name.clone(), handle);
            names.insert(handle, spec.name.clone());
        }
        tracing::info!("Replay: {} regions, {} frames", regions.len(), self.frames.len());

        let current = Rc::new(RefCell::new(CandidateSet::new()));
        let source = {
            let current = Rc::clone(&current);
            move |_: &RegionRegistry| current.borrow().clone()
        };

        let clock = ManualClock::new();
        let mut interactor = Interactor::new(source, InteractionContext::new(clock.clone()), self.interaction.clone())?;

        let events: Rc<RefCell<Vec<ReplayEvent>>> = Rc::default();
        let names = Rc::new(names);
        {
            let events = Rc::clone(&events);
            let names = Rc::clone(&names);
            let clock = clock.clone();
            interactor.logic_mut().subscribe_tap(move |args| {
                events.borrow_mut().push(ReplayEvent::Tap {
                    time: clock.now(),
                    region: region_name(&names, args.region),
                    position: args.position,
                    duration: args.duration,
                });
            });
        }
        {
            let events = Rc::clone(&events);
            let names = Rc::clone(&names);
            let clock = clock.clone();
            interactor.logic_mut().subscribe_gesture(move |args| {
                events.borrow_mut().push(ReplayEvent::Gesture {
                    time: clock.now(),
                    origin: region_name(&names, args.origin),
                    region: region_name(&names, args.region),
                    kind: args.kind,
                    phase: args.phase,
                    position: args.position,
                    delta: args.delta,
                });
            });
        }

        for frame in &self.frames {
            clock.set(frame.time);
            let mut candidates = CandidateSet::new();
            for contact in &frame.contacts {
                if let Some(handle) = handles.get(&contact.region) {
                    let heuristic = contact.heuristic.unwrap_or(contact.distance);
                    candidates.insert_closest(*handle, InteractionData::new(contact.distance, heuristic, contact.point));
                }
            }
            *current.borrow_mut() = candidates;
            interactor.process(&mut regions);
        }

        interactor.logic_mut().dispose();
        let events = events.borrow().clone();
        Ok(ReplayReport { frames: self.frames.len(), events })
    }
}
