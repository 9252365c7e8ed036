//! Per-frame candidate input.
//!
//! Contact discovery (ray casts, overlap queries) lives outside this crate. It
//! reports every region within hover range as a [`CandidateSet`], which the
//! engine consumes once and does not keep.

use crate::region::{RegionHandle, RegionRegistry};
use glam::Vec3;
use std::collections::btree_map::{self, BTreeMap};

/// Measurements for one candidate region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionData {
    /// Distance from the pointer to the region, in meters.
    pub distance: f32,
    /// Secondary ranking signal (e.g. angular alignment). Lower is better.
    pub heuristic: f32,
    /// Contact point on the region in world space.
    pub point: Vec3,
}

impl InteractionData {
    pub fn new(distance: f32, heuristic: f32, point: Vec3) -> Self {
        Self { distance, heuristic, point }
    }

    /// Uses the distance itself as the heuristic.
    pub fn from_distance(distance: f32, point: Vec3) -> Self {
        Self::new(distance, distance, point)
    }
}

/// Candidate regions for one frame, ordered by handle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    entries: BTreeMap<RegionHandle, InteractionData>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `region`.
    pub fn insert(&mut self, region: RegionHandle, data: InteractionData) {
        self.entries.insert(region, data);
    }

    /// Inserts `data` unless the region already has a closer hit.
    pub fn insert_closest(&mut self, region: RegionHandle, data: InteractionData) {
        match self.entries.entry(region) {
            btree_map::Entry::Occupied(mut existing) => {
                if data.distance < existing.get().distance {
                    existing.insert(data);
                }
            }
            btree_map::Entry::Vacant(slot) => {
                slot.insert(data);
            }
        }
    }

    pub fn get(&self, region: RegionHandle) -> Option<&InteractionData> {
        self.entries.get(&region)
    }

    pub fn contains(&self, region: RegionHandle) -> bool {
        self.entries.contains_key(&region)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionHandle, &InteractionData)> + '_ {
        self.entries.iter().map(|(handle, data)| (*handle, data))
    }
}

impl FromIterator<(RegionHandle, InteractionData)> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = (RegionHandle, InteractionData)>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for (handle, data) in iter {
            set.insert_closest(handle, data);
        }
        set
    }
}

/// Produces the candidate set for the current frame.
pub trait CandidateSource {
    fn build_candidates(&mut self, regions: &RegionRegistry) -> CandidateSet;
}

impl<F> CandidateSource for F
where
    F: FnMut(&RegionRegistry) -> CandidateSet,
{
    fn build_candidates(&mut self, regions: &RegionRegistry) -> CandidateSet {
        self(regions)
    }
}
