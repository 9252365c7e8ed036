//! # HPUI Interaction (`hpui-interaction`)
//!
//! Contact classification and priority resolution for regions laid out on a
//! hand surface and touched by a tracked fingertip.
//!
//! Every frame the host reports which regions the pointer is near as a
//! [`CandidateSet`]. [`GestureLogic::update`] then
//!
//! - picks the single priority region (lowest z-order, then heuristic, then distance),
//! - classifies each ongoing contact as a tap or a gesture,
//! - routes gestures a region declines to the next engaged region that accepts them,
//!
//! and delivers the results to the regions and to interactor-level subscribers.
//!
//! ```
//! use hpui_core::{InteractionConfig, SurfaceRect, Vec2, Vec3};
//! use hpui_interaction::{CandidateSet, GestureLogic, InteractionContext, InteractionData, ManualClock, PlanarRegion, RegionRegistry};
//!
//! let mut regions = RegionRegistry::new();
//! let button = regions.insert(Box::new(PlanarRegion::new(
//!     "button",
//!     SurfaceRect::axis_aligned(Vec3::ZERO, Vec2::splat(0.01)),
//! )));
//!
//! let clock = ManualClock::new();
//! let mut logic = GestureLogic::new(InteractionContext::new(clock.clone()), InteractionConfig::default()).unwrap();
//!
//! let mut touching = CandidateSet::new();
//! touching.insert(button, InteractionData::from_distance(0.002, Vec3::ZERO));
//! logic.update(&mut regions, &touching);
//! assert!(logic.is_priority_target(button));
//!
//! clock.advance(0.1);
//! logic.update(&mut regions, &CandidateSet::new());
//! assert_eq!(logic.contact_count(), 0);
//! ```

pub mod candidates;
pub mod clock;
pub mod contact;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;
pub mod interactor;
pub mod planar;
pub mod priority;
pub mod region;
pub mod replay;
pub mod router;
pub mod select;

#[cfg(test)]
mod test_support;

pub use candidates::{CandidateSet, CandidateSource, InteractionData};
pub use clock::{FrameClock, ManualClock, SystemClock};
pub use contact::{ContactRecord, ContactState};
pub use dispatch::{DeferredCommand, DispatchContext};
pub use engine::{GestureLogic, InteractionContext};
pub use error::InteractionError;
pub use events::{
    EventSubscribers, GestureEventArgs, GesturePhase, HoverEventArgs, HoverPhase, InteractorId, SubscriptionToken,
    TapEventArgs,
};
pub use interactor::Interactor;
pub use planar::PlanarRegion;
pub use priority::{select_priority, PriorityResolver, RankedCandidate};
pub use region::{GestureKind, Region, RegionHandle, RegionRegistry};
pub use router::{GestureRouter, Route};
pub use select::SelectFilter;
