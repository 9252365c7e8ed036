// src/interactor.rs

//! Pointer driver: candidate discovery plus the gesture logic.

use crate::candidates::{CandidateSet, CandidateSource};
use crate::engine::{GestureLogic, InteractionContext};
use crate::error::InteractionError;
use crate::region::{RegionHandle, RegionRegistry};
use glam::Vec3;
use hpui_core::InteractionConfig;

/// One tracked pointer.
///
/// Each frame the source reports what it touches. Hits beyond the hover radius
/// are discarded before the candidates reach the [`GestureLogic`].
pub struct Interactor<S: CandidateSource> {
    source: S,
    logic: GestureLogic,
    candidates: CandidateSet,
    attach_point: Vec3,
}

impl<S: CandidateSource> Interactor<S> {
    pub fn new(source: S, context: InteractionContext, config: InteractionConfig) -> Result<Self, InteractionError> {
        Ok(Self {
            source,
            logic: GestureLogic::new(context, config)?,
            candidates: CandidateSet::new(),
            attach_point: Vec3::ZERO,
        })
    }

    /// Runs discovery and one engine frame.
    pub fn process(&mut self, regions: &mut RegionRegistry) {
        if self.logic.is_disposed() {
            return;
        }
        let hover_radius = self.logic.config().hover_radius;
        let discovered = self.source.build_candidates(regions);
        let before = discovered.len();
        self.candidates = discovered
            .iter()
            .filter(|(_, data)| data.distance < hover_radius)
            .map(|(handle, data)| (handle, *data))
            .collect();
        if self.candidates.len() != before {
            tracing::trace!(
                "Interactor: dropped {} hits outside hover radius",
                before - self.candidates.len()
            );
        }
        self.logic.update(regions, &self.candidates);
    }

    /// Regions hit in the latest frame, lowest z-order first.
    pub fn valid_targets(&self, regions: &RegionRegistry) -> Vec<RegionHandle> {
        let mut targets: Vec<(i32, RegionHandle)> = self
            .candidates
            .iter()
            .filter_map(|(handle, _)| regions.get(handle).map(|region| (region.z_order(), handle)))
            .collect();
        targets.sort();
        targets.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Whether `region` may be selected given the latest frame's hit on it.
    pub fn can_select(&self, regions: &RegionRegistry, region: RegionHandle) -> bool {
        match self.candidates.get(region) {
            Some(data) => self.logic.can_select(regions, region, data),
            None => false,
        }
    }

    /// Where the pointer touched `region`, or the attach point if it did not.
    pub fn collision_point(&self, region: RegionHandle) -> Vec3 {
        self.candidates.get(region).map_or(self.attach_point, |data| data.point)
    }

    pub fn set_attach_point(&mut self, point: Vec3) {
        self.attach_point = point;
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn logic(&self) -> &GestureLogic {
        &self.logic
    }

    pub fn logic_mut(&mut self) -> &mut GestureLogic {
        &mut self.logic
    }

    /// Replaces the engine with one built from `config`, as when thresholds
    /// change at runtime. The old engine is disposed and its contacts are lost.
    ///
    /// Fails with [`InteractionError::Disposed`] once the engine has been disposed.
    pub fn reconfigure(&mut self, config: InteractionConfig) -> Result<(), InteractionError> {
        config.validate()?;
        let context = InteractionContext {
            interactor: self.logic.interactor(),
            clock: self.logic.take_clock().ok_or(InteractionError::Disposed)?,
        };
        let logic = GestureLogic::new(context, config)?;
        self.logic = logic;
        self.candidates = CandidateSet::new();
        Ok(())
    }
}
