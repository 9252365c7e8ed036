//! Host-supplied vetoes on selection.

use crate::candidates::InteractionData;
use crate::region::{Region, RegionHandle};

/// Decides whether a candidate may be (or stay) selected.
///
/// Every registered filter must agree. Filters run after the radius and
/// priority checks.
pub trait SelectFilter {
    fn can_select(&self, handle: RegionHandle, region: &dyn Region, data: &InteractionData) -> bool;
}

impl<F> SelectFilter for F
where
    F: Fn(RegionHandle, &dyn Region, &InteractionData) -> bool,
{
    fn can_select(&self, handle: RegionHandle, region: &dyn Region, data: &InteractionData) -> bool {
        self(handle, region, data)
    }
}
