// src/region.rs

//! Regions and the host-owned arena that stores them.
//!
//! A [`Region`] is any interactable surface area that can receive taps and
//! gestures. The engine never owns regions: the host keeps them in a
//! [`RegionRegistry`] and hands out [`RegionHandle`]s. Handles are
//! generational, so a handle to a removed region never resolves to whatever
//! gets stored in the same slot later.

use crate::dispatch::DispatchContext;
use crate::events::{GestureEventArgs, TapEventArgs};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gesture classes a region may declare support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// The contact moved further than the tap distance threshold.
    Swipe,
    /// The contact stayed put past the tap time threshold (only when time
    /// classification is enabled).
    Hold,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureKind::Swipe => write!(f, "swipe"),
            GestureKind::Hold => write!(f, "hold"),
        }
    }
}

/// Capability implemented by every interactable region.
///
/// Callbacks are fire-and-forget. They may not touch the engine directly;
/// anything they want changed goes through the [`DispatchContext`] and is
/// applied on the next frame.
pub trait Region {
    /// Stacking rank. Lower values win. Read fresh every frame.
    fn z_order(&self) -> i32;

    /// Maps a world-space point onto this region's normalized 2D surface.
    fn surface_coordinates(&self, point: Vec3) -> Vec2;

    /// Whether this region wants gestures of `kind`. If not, they fall
    /// through to the next engaged region in priority order.
    fn handles_gesture(&self, kind: GestureKind) -> bool;

    fn on_tap(&mut self, args: TapEventArgs, ctx: &mut DispatchContext<'_>);

    fn on_gesture(&mut self, args: GestureEventArgs, ctx: &mut DispatchContext<'_>);

    /// Name used in log output.
    fn name(&self) -> &str {
        "region"
    }
}

/// Stable key for a region in a [`RegionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionHandle {
    index: u32,
    generation: u32,
}

impl RegionHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for RegionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

struct Slot {
    generation: u32,
    region: Option<Box<dyn Region>>,
}

/// Arena of regions keyed by generational handles.
#[derive(Default)]
pub struct RegionRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `region` and returns its handle. Freed slots are reused with a
    /// bumped generation.
    pub fn insert(&mut self, region: Box<dyn Region>) -> RegionHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.region = Some(region);
            return RegionHandle { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, region: Some(region) });
        RegionHandle { index, generation: 0 }
    }

    /// Removes and returns the region. Stale handles return `None`.
    pub fn remove(&mut self, handle: RegionHandle) -> Option<Box<dyn Region>> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let region = slot.region.take()?;
        self.free.push(handle.index);
        Some(region)
    }

    pub fn get(&self, handle: RegionHandle) -> Option<&dyn Region> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.region.as_deref()
    }

    pub fn get_mut(&mut self, handle: RegionHandle) -> Option<&mut (dyn Region + 'static)> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.region.as_deref_mut()
    }

    pub fn contains(&self, handle: RegionHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.region.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live regions in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionHandle, &dyn Region)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.region.as_deref().map(|region| {
                (
                    RegionHandle { index: index as u32, generation: slot.generation },
                    region,
                )
            })
        })
    }

    /// Looks a region up by its [`Region::name`].
    pub fn find_by_name(&self, name: &str) -> Option<RegionHandle> {
        self.iter().find(|(_, region)| region.name() == name).map(|(handle, _)| handle)
    }
}

impl fmt::Debug for RegionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionRegistry")
            .field("slots", &self.slots.len())
            .field("live", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(&'static str, i32);

    impl Region for Dummy {
        fn z_order(&self) -> i32 {
            self.1
        }
        fn surface_coordinates(&self, _point: Vec3) -> Vec2 {
            Vec2::ZERO
        }
        fn handles_gesture(&self, _kind: GestureKind) -> bool {
            false
        }
        fn on_tap(&mut self, _args: TapEventArgs, _ctx: &mut DispatchContext<'_>) {}
        fn on_gesture(&mut self, _args: GestureEventArgs, _ctx: &mut DispatchContext<'_>) {}
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_insert_get_remove() {
        let mut registry = RegionRegistry::new();
        let a = registry.insert(Box::new(Dummy("a", 0)));
        let b = registry.insert(Box::new(Dummy("b", 3)));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(b).map(|r| r.z_order()), Some(3));
        assert!(registry.remove(a).is_some());
        assert!(!registry.contains(a));
        assert!(registry.remove(a).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_stale_handle_does_not_resolve_to_reused_slot() {
        let mut registry = RegionRegistry::new();
        let old = registry.insert(Box::new(Dummy("old", 0)));
        registry.remove(old);
        let new = registry.insert(Box::new(Dummy("new", 1)));

        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(registry.get(old).is_none());
        assert!(registry.get_mut(old).is_none());
        assert_eq!(registry.get(new).map(|r| r.name()), Some("new"));
    }

    #[test]
    fn test_find_by_name_and_iter() {
        let mut registry = RegionRegistry::new();
        let a = registry.insert(Box::new(Dummy("a", 0)));
        let b = registry.insert(Box::new(Dummy("b", 0)));
        registry.remove(a);

        assert_eq!(registry.find_by_name("b"), Some(b));
        assert_eq!(registry.find_by_name("a"), None);
        assert_eq!(registry.iter().map(|(h, _)| h).collect::<Vec<_>>(), vec![b]);
    }
}
