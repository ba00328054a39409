use crate::types::RegionRect;
use glam::Vec2;

/// Latest known pointer sample and whether it lies inside the
/// interaction region.
///
/// Written by the host's pointer feed, read (never written) by
/// [`crate::sim::tick`]. There are no error conditions; the tracker
/// always holds the current best-known values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Last sample in absolute host coordinates.
    pub position: Vec2,
    /// Whether the sample fell inside the region's live bounding box.
    pub inside_region: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer sample.
    ///
    /// Unconditionally overwrites `position` and recomputes
    /// `inside_region` with one bounding-box test against the live
    /// region rectangle. While no usable region is mounted the flag is
    /// forced `false`. Runs on every move notification, undebounced.
    pub fn on_pointer_move(&mut self, position: Vec2, region: Option<&RegionRect>) {
        self.position = position;
        self.inside_region = match region {
            Some(r) if r.is_usable() => r.contains(position),
            _ => false,
        };
    }

    /// Fast-path transition for a host boundary-enter notification.
    pub fn on_region_enter(&mut self) {
        self.inside_region = true;
    }

    /// Fast-path transition for a host boundary-leave notification.
    pub fn on_region_leave(&mut self) {
        self.inside_region = false;
    }

    /// Pointer position in region-relative percentage units.
    ///
    /// Callers must check [`RegionRect::is_usable`] first.
    #[inline]
    pub fn region_percent(&self, region: &RegionRect) -> Vec2 {
        region.point_to_percent(self.position)
    }
}
