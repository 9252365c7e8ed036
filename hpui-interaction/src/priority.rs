//! Picks the single authoritative region among overlapping candidates.

use crate::candidates::InteractionData;
use crate::region::RegionHandle;
use std::cmp::Ordering;

/// A candidate as seen by the resolver: handle, current z-order and measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub region: RegionHandle,
    pub z_order: i32,
    pub data: InteractionData,
}

impl RankedCandidate {
    /// Lower z-order, then lower heuristic, then lower distance, then handle.
    fn rank(&self, other: &Self) -> Ordering {
        self.z_order
            .cmp(&other.z_order)
            .then_with(|| self.data.heuristic.total_cmp(&other.data.heuristic))
            .then_with(|| self.data.distance.total_cmp(&other.data.distance))
            .then_with(|| self.region.cmp(&other.region))
    }
}

/// Pure selection: the best candidate strictly inside `selection_radius`.
pub fn select_priority<'a, I>(candidates: I, selection_radius: f32) -> Option<RegionHandle>
where
    I: IntoIterator<Item = &'a RankedCandidate>,
{
    candidates
        .into_iter()
        .filter(|candidate| candidate.data.distance < selection_radius)
        .min_by(|a, b| a.rank(b))
        .map(|candidate| candidate.region)
}

/// Remembers the winner of the most recent frame for `is_priority_target` queries.
#[derive(Debug, Clone, Default)]
pub struct PriorityResolver {
    current: Option<RegionHandle>,
}

impl PriorityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, candidates: &[RankedCandidate], selection_radius: f32) -> Option<RegionHandle> {
        let winner = select_priority(candidates, selection_radius);
        if winner != self.current {
            tracing::debug!("PriorityResolver: priority target {:?} -> {:?}", self.current, winner);
        }
        self.current = winner;
        winner
    }

    pub fn current(&self) -> Option<RegionHandle> {
        self.current
    }

    pub fn is_priority_target(&self, region: RegionHandle) -> bool {
        self.current == Some(region)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
