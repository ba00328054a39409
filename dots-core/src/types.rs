use glam::Vec2;

/// Axis-aligned rectangle describing the interaction region in the
/// host's absolute pixel coordinate space.
///
/// Particles live in percentage-of-region coordinates ([0, 100] on both
/// axes); this type carries the conversions between that space, pixel
/// offsets relative to the region origin, and absolute host points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionRect {
    /// Top-left corner in absolute pixels.
    pub min: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
}

impl RegionRect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Returns `true` if the region has positive area.
    ///
    /// A zero or negative extent on either axis counts as "geometry
    /// unavailable": conversions that divide by the extents must not be
    /// called on an unusable region.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    /// Bounding-box test against an absolute point (edges inclusive).
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.min + self.size;
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }

    /// Converts percentage coordinates to a pixel offset relative to
    /// the region origin.
    #[inline]
    pub fn percent_to_offset(&self, pct: Vec2) -> Vec2 {
        pct / 100.0 * self.size
    }

    /// Converts a pixel offset relative to the region origin back to
    /// percentage coordinates.
    ///
    /// Callers must check [`RegionRect::is_usable`] first; a zero-area
    /// region would divide by zero here.
    #[inline]
    pub fn offset_to_percent(&self, offset: Vec2) -> Vec2 {
        offset / self.size * 100.0
    }

    /// Converts an absolute host point to percentage coordinates.
    ///
    /// Callers must check [`RegionRect::is_usable`] first.
    #[inline]
    pub fn point_to_percent(&self, p: Vec2) -> Vec2 {
        (p - self.min) / self.size * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_includes_edges_and_excludes_outside() {
        let r = RegionRect::new(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));

        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(110.0, 70.0)));
        assert!(r.contains(Vec2::new(60.0, 45.0)));

        assert!(!r.contains(Vec2::new(9.9, 45.0)));
        assert!(!r.contains(Vec2::new(60.0, 70.1)));
    }

    #[test]
    fn zero_area_region_is_not_usable() {
        assert!(!RegionRect::new(Vec2::ZERO, Vec2::new(0.0, 100.0)).is_usable());
        assert!(!RegionRect::new(Vec2::ZERO, Vec2::new(100.0, 0.0)).is_usable());
        assert!(!RegionRect::new(Vec2::ZERO, Vec2::new(-5.0, 100.0)).is_usable());
        assert!(RegionRect::new(Vec2::ZERO, Vec2::new(1.0, 1.0)).is_usable());
    }

    #[test]
    fn percent_and_offset_conversions_are_inverse() {
        let r = RegionRect::new(Vec2::new(5.0, 5.0), Vec2::new(200.0, 100.0));
        let pct = Vec2::new(50.0, 25.0);

        let offset = r.percent_to_offset(pct);
        assert_eq!(offset, Vec2::new(100.0, 25.0));
        assert_eq!(r.offset_to_percent(offset), pct);
    }

    #[test]
    fn point_to_percent_is_relative_to_region_origin() {
        let r = RegionRect::new(Vec2::new(100.0, 50.0), Vec2::new(200.0, 100.0));

        assert_eq!(r.point_to_percent(Vec2::new(100.0, 50.0)), Vec2::ZERO);
        assert_eq!(
            r.point_to_percent(Vec2::new(200.0, 100.0)),
            Vec2::new(50.0, 50.0)
        );
        assert_eq!(
            r.point_to_percent(Vec2::new(300.0, 150.0)),
            Vec2::new(100.0, 100.0)
        );
    }
}
