//! Fallback routing of gestures through stacked regions.
//!
//! A control embedded in a scrollable panel usually does not want swipes; the
//! panel underneath does. When the region a gesture started on declines the
//! gesture kind, the router walks the other engaged regions in ascending
//! z-order and hands the gesture to the first one that accepts it.

use crate::region::{GestureKind, RegionHandle, RegionRegistry};

/// Where a gesture ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The originating region handles the gesture itself.
    Origin(RegionHandle),
    /// Another engaged region accepted it.
    Fallback(RegionHandle),
    /// Nobody wants it. Not an error.
    Dropped,
}

impl Route {
    pub fn handler(self) -> Option<RegionHandle> {
        match self {
            Route::Origin(handle) | Route::Fallback(handle) => Some(handle),
            Route::Dropped => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GestureRouter;

impl GestureRouter {
    pub fn new() -> Self {
        Self
    }

    /// Finds the handler for a `kind` gesture that started on `origin`.
    ///
    /// `engaged` lists the regions currently held by the same pointer; any
    /// handle that no longer resolves in `regions` is skipped.
    pub fn route<I>(&self, origin: RegionHandle, kind: GestureKind, engaged: I, regions: &RegionRegistry) -> Route
    where
        I: IntoIterator<Item = RegionHandle>,
    {
        if regions.get(origin).map_or(false, |region| region.handles_gesture(kind)) {
            return Route::Origin(origin);
        }

        let mut fallbacks: Vec<(i32, RegionHandle)> = engaged
            .into_iter()
            .filter(|handle| *handle != origin)
            .filter_map(|handle| regions.get(handle).map(|region| (region.z_order(), handle)))
            .collect();
        fallbacks.sort();

        for (_, handle) in fallbacks {
            if regions.get(handle).map_or(false, |region| region.handles_gesture(kind)) {
                tracing::debug!("GestureRouter: {} declined {}, falling back to {}", origin, kind, handle);
                return Route::Fallback(handle);
            }
        }

        tracing::trace!("GestureRouter: no engaged region handles {} from {}", kind, origin);
        Route::Dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingRegion;

    #[test]
    fn test_origin_that_handles_kind_keeps_gesture() {
        let mut regions = RegionRegistry::new();
        let a = regions.insert(Box::new(RecordingRegion::new("a", 0).with_gestures(&[GestureKind::Swipe])));
        let b = regions.insert(Box::new(RecordingRegion::new("b", 1).with_gestures(&[GestureKind::Swipe])));

        let route = GestureRouter::new().route(a, GestureKind::Swipe, [a, b], &regions);
        assert_eq!(route, Route::Origin(a));
    }

    #[test]
    fn test_declined_gesture_falls_back_by_z_order() {
        let mut regions = RegionRegistry::new();
        let origin = regions.insert(Box::new(RecordingRegion::new("button", 0)));
        let far = regions.insert(Box::new(RecordingRegion::new("far", 5).with_gestures(&[GestureKind::Swipe])));
        let near = regions.insert(Box::new(RecordingRegion::new("panel", 1).with_gestures(&[GestureKind::Swipe])));
        let other_kind = regions.insert(Box::new(RecordingRegion::new("hold_only", -1).with_gestures(&[GestureKind::Hold])));

        let route = GestureRouter::new().route(origin, GestureKind::Swipe, [far, origin, other_kind, near], &regions);
        assert_eq!(route, Route::Fallback(near));
        assert_eq!(route.handler(), Some(near));
    }

    #[test]
    fn test_no_willing_region_drops() {
        let mut regions = RegionRegistry::new();
        let a = regions.insert(Box::new(RecordingRegion::new("a", 0)));
        let b = regions.insert(Box::new(RecordingRegion::new("b", 1)));

        let route = GestureRouter::new().route(a, GestureKind::Hold, [a, b], &regions);
        assert_eq!(route, Route::Dropped);
        assert_eq!(route.handler(), None);
    }

    #[test]
    fn test_removed_regions_are_skipped() {
        let mut regions = RegionRegistry::new();
        let origin = regions.insert(Box::new(RecordingRegion::new("origin", 0).with_gestures(&[GestureKind::Swipe])));
        let panel = regions.insert(Box::new(RecordingRegion::new("panel", 1).with_gestures(&[GestureKind::Swipe])));
        regions.remove(origin);

        let route = GestureRouter::new().route(origin, GestureKind::Swipe, [origin, panel], &regions);
        assert_eq!(route, Route::Fallback(panel));
    }
}
