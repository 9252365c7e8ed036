// src/contact.rs

//! Per-region contact lifecycle and tap/gesture classification.

use crate::region::{GestureKind, RegionHandle};
use glam::Vec3;
use hpui_core::InteractionConfig;
use std::collections::BTreeMap;

/// Classification state of a live contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactState {
    /// Not yet a gesture. Released in this state it becomes a tap.
    Undetermined,
    Gesture(GestureKind),
}

/// One engaged region.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    pub region: RegionHandle,
    pub state: ContactState,
    pub start_time: f64,
    pub start_point: Vec3,
    pub last_point: Vec3,
    /// Set once the contact outlived the tap time threshold.
    pub slow: bool,
    /// Region chosen by the router when the gesture started.
    pub handler: Option<RegionHandle>,
    /// Set when this region took over another region's gesture. A claimed
    /// contact produces no events of its own until it ends.
    pub claimed_by: Option<RegionHandle>,
}

impl ContactRecord {
    fn elapsed(&self, now: f64) -> f32 {
        (now - self.start_time).max(0.0) as f32
    }
}

/// What a contact produced this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    Tap {
        point: Vec3,
        duration: f32,
    },
    GestureStart {
        kind: GestureKind,
    },
    GestureUpdate {
        kind: GestureKind,
        delta: Vec3,
    },
    GestureEnd {
        kind: GestureKind,
        handler: Option<RegionHandle>,
    },
}

/// Outcome plus the contact data the dispatcher needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub region: RegionHandle,
    pub outcome: ContactOutcome,
    pub point: Vec3,
    pub start_point: Vec3,
    pub elapsed: f32,
    /// The contact had been claimed when this event was produced.
    pub claimed: bool,
}

/// Owns one [`ContactRecord`] per engaged region.
#[derive(Debug, Clone)]
pub struct ContactTracker {
    records: BTreeMap<RegionHandle, ContactRecord>,
    tap_time_threshold: f64,
    tap_distance_threshold: f32,
    time_forces_gesture: bool,
}

impl ContactTracker {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            records: BTreeMap::new(),
            tap_time_threshold: f64::from(config.tap_time_threshold),
            tap_distance_threshold: config.tap_distance_threshold,
            time_forces_gesture: config.time_threshold_forces_gesture,
        }
    }

    /// Starts tracking `region`. Returns `false` if it is already tracked.
    pub fn begin(&mut self, region: RegionHandle, point: Vec3, now: f64) -> bool {
        if self.records.contains_key(&region) {
            tracing::warn!("ContactTracker: {} is already engaged, ignoring begin", region);
            return false;
        }
        tracing::debug!("ContactTracker: {} engaged at t={:.3}", region, now);
        self.records.insert(
            region,
            ContactRecord {
                region,
                state: ContactState::Undetermined,
                start_time: now,
                start_point: point,
                last_point: point,
                slow: false,
                handler: None,
                claimed_by: None,
            },
        );
        true
    }

    /// Feeds a new contact point for an engaged region.
    pub fn advance(&mut self, region: RegionHandle, point: Vec3, now: f64) -> Option<ContactEvent> {
        let record = self.records.get_mut(&region)?;
        let elapsed = record.elapsed(now);

        let outcome = match record.state {
            ContactState::Undetermined => {
                let moved = point.distance(record.start_point);
                record.last_point = point;
                if moved > self.tap_distance_threshold {
                    tracing::debug!("ContactTracker: {} moved {:.4}m, classified as swipe", region, moved);
                    record.state = ContactState::Gesture(GestureKind::Swipe);
                    ContactOutcome::GestureStart { kind: GestureKind::Swipe }
                } else if now - record.start_time > self.tap_time_threshold {
                    if !record.slow {
                        tracing::trace!("ContactTracker: {} exceeded tap time threshold", region);
                        record.slow = true;
                    }
                    if !self.time_forces_gesture {
                        return None;
                    }
                    tracing::debug!("ContactTracker: {} held {:.3}s, classified as hold", region, elapsed);
                    record.state = ContactState::Gesture(GestureKind::Hold);
                    ContactOutcome::GestureStart { kind: GestureKind::Hold }
                } else {
                    return None;
                }
            }
            ContactState::Gesture(kind) => {
                let delta = point - record.last_point;
                record.last_point = point;
                ContactOutcome::GestureUpdate { kind, delta }
            }
        };

        Some(ContactEvent {
            region,
            outcome,
            point,
            start_point: record.start_point,
            elapsed,
            claimed: record.claimed_by.is_some(),
        })
    }

    /// Ends the contact on `region` and drops its record.
    pub fn finish(&mut self, region: RegionHandle, now: f64) -> Option<ContactEvent> {
        let record = self.records.remove(&region)?;
        let elapsed = record.elapsed(now);
        let outcome = match record.state {
            ContactState::Undetermined => ContactOutcome::Tap { point: record.last_point, duration: elapsed },
            ContactState::Gesture(kind) => ContactOutcome::GestureEnd { kind, handler: record.handler },
        };
        tracing::debug!("ContactTracker: {} released after {:.3}s ({:?})", region, elapsed, outcome);
        Some(ContactEvent {
            region,
            outcome,
            point: record.last_point,
            start_point: record.start_point,
            elapsed,
            claimed: record.claimed_by.is_some(),
        })
    }

    pub fn set_handler(&mut self, region: RegionHandle, handler: Option<RegionHandle>) {
        if let Some(record) = self.records.get_mut(&region) {
            record.handler = handler;
        }
    }

    /// Marks `region` as handling the gesture that started on `origin`.
    /// Returns `false` if it is not engaged or already claimed.
    pub fn claim(&mut self, region: RegionHandle, origin: RegionHandle) -> bool {
        match self.records.get_mut(&region) {
            Some(record) if record.claimed_by.is_none() => {
                tracing::debug!("ContactTracker: {} claimed by gesture from {}", region, origin);
                record.claimed_by = Some(origin);
                true
            }
            _ => false,
        }
    }

    pub fn is_claimed(&self, region: RegionHandle) -> bool {
        self.records.get(&region).map_or(false, |record| record.claimed_by.is_some())
    }

    /// Engaged regions free to take over another region's gesture: not
    /// claimed and not already routing a gesture of their own.
    pub fn fallback_candidates(&self) -> impl Iterator<Item = RegionHandle> + '_ {
        self.records
            .values()
            .filter(|record| record.claimed_by.is_none() && record.handler.is_none())
            .map(|record| record.region)
    }

    pub fn handler(&self, region: RegionHandle) -> Option<RegionHandle> {
        self.records.get(&region).and_then(|record| record.handler)
    }

    pub fn get(&self, region: RegionHandle) -> Option<&ContactRecord> {
        self.records.get(&region)
    }

    pub fn contains(&self, region: RegionHandle) -> bool {
        self.records.contains_key(&region)
    }

    pub fn state(&self, region: RegionHandle) -> Option<ContactState> {
        self.records.get(&region).map(|record| record.state)
    }

    /// Engaged regions in handle order.
    pub fn engaged(&self) -> impl Iterator<Item = RegionHandle> + '_ {
        self.records.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record without producing events.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
