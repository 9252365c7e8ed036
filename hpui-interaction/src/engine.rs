// src/engine.rs

//! The per-frame gesture logic.
//!
//! [`GestureLogic::update`] is called once per host frame with the regions in
//! hover range. It decides which region has priority, moves every contact
//! through its tap/gesture lifecycle, and delivers the resulting events.
//!
//! Callbacks are delivered in ascending z-order of the region each event
//! originated on, so a lower-priority region never sees a gesture before a
//! higher-priority one had the chance to claim it.

use crate::candidates::{CandidateSet, InteractionData};
use crate::clock::FrameClock;
use crate::contact::{ContactEvent, ContactOutcome, ContactRecord, ContactState, ContactTracker};
use crate::dispatch::{DeferredCommand, DispatchContext};
use crate::error::InteractionError;
use crate::events::{
    EventSubscribers, GestureEventArgs, GesturePhase, HoverEventArgs, HoverPhase, InteractorId, SubscriptionToken,
    TapEventArgs,
};
use crate::priority::{PriorityResolver, RankedCandidate};
use crate::region::{GestureKind, RegionHandle, RegionRegistry};
use crate::router::{GestureRouter, Route};
use crate::select::SelectFilter;
use glam::Vec3;
use hpui_core::InteractionConfig;
use std::collections::BTreeSet;
use std::fmt;

/// Everything the engine needs from its host besides configuration.
pub struct InteractionContext {
    pub interactor: InteractorId,
    pub clock: Box<dyn FrameClock>,
}

impl InteractionContext {
    /// A context for a fresh interactor id.
    pub fn new<C: FrameClock + 'static>(clock: C) -> Self {
        Self {
            interactor: InteractorId::new(),
            clock: Box::new(clock),
        }
    }

    pub fn with_interactor(mut self, interactor: InteractorId) -> Self {
        self.interactor = interactor;
        self
    }
}

impl fmt::Debug for InteractionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionContext").field("interactor", &self.interactor).finish()
    }
}

/// Tap/gesture engine for one pointer.
pub struct GestureLogic {
    interactor: InteractorId,
    config: InteractionConfig,
    clock: Option<Box<dyn FrameClock>>,
    tracker: ContactTracker,
    resolver: PriorityResolver,
    router: GestureRouter,
    hovered: BTreeSet<RegionHandle>,
    // Released by a callback; cannot re-engage until out of selection range.
    blocked: BTreeSet<RegionHandle>,
    deferred: Vec<DeferredCommand>,
    filters: Vec<Box<dyn SelectFilter>>,
    tap_event: EventSubscribers<TapEventArgs>,
    gesture_event: EventSubscribers<GestureEventArgs>,
    hover_event: EventSubscribers<HoverEventArgs>,
    disposed: bool,
}

impl GestureLogic {
    /// # Errors
    ///
    /// [`InteractionError::Config`] if `config` fails validation.
    pub fn new(context: InteractionContext, config: InteractionConfig) -> Result<Self, InteractionError> {
        config.validate()?;
        tracing::info!(
            interactor = %context.interactor,
            tap_time_threshold = config.tap_time_threshold,
            tap_distance_threshold = config.tap_distance_threshold,
            selection_radius = config.selection_radius,
            select_only_priority_target = config.select_only_priority_target,
            "GestureLogic: initialized"
        );

        Ok(Self {
            interactor: context.interactor,
            tracker: ContactTracker::new(&config),
            config,
            clock: Some(context.clock),
            resolver: PriorityResolver::new(),
            router: GestureRouter::new(),
            hovered: BTreeSet::new(),
            blocked: BTreeSet::new(),
            deferred: Vec::new(),
            filters: Vec::new(),
            tap_event: EventSubscribers::new(),
            gesture_event: EventSubscribers::new(),
            hover_event: EventSubscribers::new(),
            disposed: false,
        })
    }

    /// Runs one frame.
    ///
    /// `candidates` is only borrowed for the duration of the call. Handles
    /// that no longer resolve in `regions` are treated as having left.
    pub fn update(&mut self, regions: &mut RegionRegistry, candidates: &CandidateSet) {
        if self.disposed {
            tracing::trace!("GestureLogic: update after dispose ignored");
            return;
        }
        let now = match &self.clock {
            Some(clock) => clock.now(),
            None => return,
        };

        let mut events: Vec<ContactEvent> = Vec::new();
        self.apply_deferred(now, &mut events);

        let live: Vec<RankedCandidate> = candidates
            .iter()
            .filter_map(|(region, data)| {
                regions.get(region).map(|r| RankedCandidate {
                    region,
                    z_order: r.z_order(),
                    data: *data,
                })
            })
            .collect();

        let priority = self.resolver.resolve(&live, self.config.selection_radius);
        self.track_hover(&live);

        let radius = self.config.selection_radius;
        self.blocked
            .retain(|region| live.iter().any(|c| c.region == *region && c.data.distance < radius));

        let engaged: Vec<RegionHandle> = self.tracker.engaged().collect();
        for region in engaged {
            let still_selected = live
                .iter()
                .find(|c| c.region == region)
                .filter(|c| self.selectable(c, priority, regions));
            let event = match still_selected {
                Some(candidate) => self.tracker.advance(region, candidate.data.point, now),
                None => self.tracker.finish(region, now),
            };
            events.extend(event);
        }

        for candidate in &live {
            if self.tracker.contains(candidate.region) || self.blocked.contains(&candidate.region) {
                continue;
            }
            if self.selectable(candidate, priority, regions) {
                self.tracker.begin(candidate.region, candidate.data.point, now);
            }
        }

        self.dispatch(events, regions);
    }

    fn apply_deferred(&mut self, now: f64, events: &mut Vec<ContactEvent>) {
        for command in std::mem::take(&mut self.deferred) {
            match command {
                DeferredCommand::Release(region) => {
                    tracing::debug!("GestureLogic: applying deferred release of {}", region);
                    events.extend(self.tracker.finish(region, now));
                    self.blocked.insert(region);
                }
            }
        }
    }

    fn track_hover(&mut self, live: &[RankedCandidate]) {
        let current: BTreeSet<RegionHandle> = live.iter().map(|c| c.region).collect();

        for region in current.difference(&self.hovered) {
            tracing::trace!("GestureLogic: hover entered {}", region);
            self.hover_event.emit(&HoverEventArgs {
                interactor: self.interactor,
                region: *region,
                phase: HoverPhase::Entered,
            });
        }
        for region in self.hovered.difference(&current) {
            tracing::trace!("GestureLogic: hover exited {}", region);
            self.hover_event.emit(&HoverEventArgs {
                interactor: self.interactor,
                region: *region,
                phase: HoverPhase::Exited,
            });
        }
        self.hovered = current;
    }

    fn selectable(&self, candidate: &RankedCandidate, priority: Option<RegionHandle>, regions: &RegionRegistry) -> bool {
        if candidate.data.distance >= self.config.selection_radius {
            return false;
        }
        if self.config.select_only_priority_target && priority != Some(candidate.region) {
            return false;
        }
        match regions.get(candidate.region) {
            Some(region) => self
                .filters
                .iter()
                .all(|filter| filter.can_select(candidate.region, region, &candidate.data)),
            None => false,
        }
    }

    fn dispatch(&mut self, mut events: Vec<ContactEvent>, regions: &mut RegionRegistry) {
        if events.is_empty() {
            return;
        }
        events.sort_by_key(|event| {
            let z_order = regions.get(event.region).map_or(i32::MAX, |region| region.z_order());
            (z_order, event.region)
        });

        let mut queue: Vec<DeferredCommand> = Vec::new();
        for event in events {
            if event.claimed || self.tracker.is_claimed(event.region) {
                tracing::trace!("GestureLogic: {} is handling another gesture, own event dropped", event.region);
                continue;
            }
            match event.outcome {
                ContactOutcome::Tap { point, duration } => {
                    self.deliver_tap(&event, point, duration, regions, &mut queue);
                }
                ContactOutcome::GestureStart { kind } => {
                    let route = self.router.route(event.region, kind, self.tracker.fallback_candidates(), regions);
                    if let Route::Fallback(handler) = route {
                        self.tracker.claim(handler, event.region);
                    }
                    self.tracker.set_handler(event.region, route.handler());
                    if let Some(handler) = route.handler() {
                        self.deliver_gesture(&event, handler, kind, GesturePhase::Start, Vec3::ZERO, regions, &mut queue);
                    }
                }
                ContactOutcome::GestureUpdate { kind, delta } => {
                    let stored = self.tracker.handler(event.region);
                    if let Some(handler) = self.current_handler(event.region, kind, stored, regions) {
                        self.deliver_gesture(&event, handler, kind, GesturePhase::Update, delta, regions, &mut queue);
                    }
                }
                ContactOutcome::GestureEnd { kind, handler } => {
                    if let Some(handler) = self.current_handler(event.region, kind, handler, regions) {
                        self.deliver_gesture(&event, handler, kind, GesturePhase::End, Vec3::ZERO, regions, &mut queue);
                    }
                }
            }
        }
        self.deferred.append(&mut queue);
    }

    /// The stored handler if it still exists, otherwise a fresh route.
    /// A gesture nobody accepted at start stays unrouted.
    fn current_handler(
        &mut self,
        origin: RegionHandle,
        kind: GestureKind,
        stored: Option<RegionHandle>,
        regions: &RegionRegistry,
    ) -> Option<RegionHandle> {
        let stored = stored?;
        if regions.contains(stored) {
            return Some(stored);
        }
        tracing::debug!("GestureLogic: handler {} of {} vanished, re-routing", stored, origin);
        let route = self.router.route(origin, kind, self.tracker.fallback_candidates(), regions);
        if let Route::Fallback(handler) = route {
            self.tracker.claim(handler, origin);
        }
        self.tracker.set_handler(origin, route.handler());
        route.handler()
    }

    fn deliver_tap(
        &mut self,
        event: &ContactEvent,
        point: Vec3,
        duration: f32,
        regions: &mut RegionRegistry,
        queue: &mut Vec<DeferredCommand>,
    ) {
        let Some(region) = regions.get_mut(event.region) else {
            tracing::trace!("GestureLogic: tap on removed region {} dropped", event.region);
            return;
        };
        let args = TapEventArgs {
            interactor: self.interactor,
            region: event.region,
            point,
            position: region.surface_coordinates(point),
            duration,
        };
        tracing::debug!("GestureLogic: tap on '{}' at {:?}", region.name(), args.position);
        region.on_tap(args, &mut DispatchContext::new(self.interactor, queue));
        self.tap_event.emit(&args);
    }

    #[allow(clippy::too_many_arguments)]
    fn deliver_gesture(
        &mut self,
        event: &ContactEvent,
        handler: RegionHandle,
        kind: GestureKind,
        phase: GesturePhase,
        delta: Vec3,
        regions: &mut RegionRegistry,
        queue: &mut Vec<DeferredCommand>,
    ) {
        let Some(region) = regions.get_mut(handler) else {
            return;
        };
        let args = GestureEventArgs {
            interactor: self.interactor,
            origin: event.region,
            region: handler,
            kind,
            phase,
            point: event.point,
            start_point: event.start_point,
            delta,
            position: region.surface_coordinates(event.point),
            start_position: region.surface_coordinates(event.start_point),
            elapsed: event.elapsed,
        };
        tracing::trace!("GestureLogic: {} {:?} to '{}'", kind, phase, region.name());
        region.on_gesture(args, &mut DispatchContext::new(self.interactor, queue));
        self.gesture_event.emit(&args);
    }

    /// Drops all contacts, subscribers, filters and the clock. Emits nothing.
    /// Calling it again is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        tracing::info!(interactor = %self.interactor, contacts = self.tracker.len(), "GestureLogic: disposed");
        self.tracker.clear();
        self.resolver.clear();
        self.hovered.clear();
        self.blocked.clear();
        self.deferred.clear();
        self.filters.clear();
        self.tap_event.clear();
        self.gesture_event.clear();
        self.hover_event.clear();
        self.clock = None;
        self.disposed = true;
    }

    /// Hands the clock over to a successor engine and disposes this one.
    pub(crate) fn take_clock(&mut self) -> Option<Box<dyn FrameClock>> {
        let clock = self.clock.take();
        self.dispose();
        clock
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether `region` won priority in the latest frame.
    pub fn is_priority_target(&self, region: RegionHandle) -> bool {
        self.resolver.is_priority_target(region)
    }

    pub fn priority_target(&self) -> Option<RegionHandle> {
        self.resolver.current()
    }

    /// Selection gate for hosts that drive their own select/deselect: radius,
    /// priority (when configured) and select filters against the latest frame.
    pub fn can_select(&self, regions: &RegionRegistry, region: RegionHandle, data: &InteractionData) -> bool {
        let Some(target) = regions.get(region) else {
            return false;
        };
        let candidate = RankedCandidate { region, z_order: target.z_order(), data: *data };
        !self.blocked.contains(&region) && self.selectable(&candidate, self.resolver.current(), regions)
    }

    pub fn contact(&self, region: RegionHandle) -> Option<&ContactRecord> {
        self.tracker.get(region)
    }

    pub fn contact_state(&self, region: RegionHandle) -> Option<ContactState> {
        self.tracker.state(region)
    }

    pub fn contact_count(&self) -> usize {
        self.tracker.len()
    }

    pub fn engaged(&self) -> Vec<RegionHandle> {
        self.tracker.engaged().collect()
    }

    pub fn is_engaged(&self, region: RegionHandle) -> bool {
        self.tracker.contains(region)
    }

    pub fn is_hovered(&self, region: RegionHandle) -> bool {
        self.hovered.contains(&region)
    }

    pub fn hovered(&self) -> impl Iterator<Item = RegionHandle> + '_ {
        self.hovered.iter().copied()
    }

    /// Commands queued by callbacks that will apply on the next update.
    pub fn pending_commands(&self) -> &[DeferredCommand] {
        &self.deferred
    }

    pub fn add_select_filter<F: SelectFilter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
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

    pub fn subscribe_hover<F: FnMut(&HoverEventArgs) + 'static>(&mut self, handler: F) -> SubscriptionToken {
        self.hover_event.subscribe(handler)
    }

    pub fn unsubscribe_hover(&mut self, token: SubscriptionToken) -> bool {
        self.hover_event.unsubscribe(token)
    }

    pub fn interactor(&self) -> InteractorId {
        self.interactor
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }
}

impl Drop for GestureLogic {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for GestureLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureLogic")
            .field("interactor", &self.interactor)
            .field("config", &self.config)
            .field("contacts", &self.tracker.len())
            .field("priority", &self.resolver.current())
            .field("hovered", &self.hovered.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
