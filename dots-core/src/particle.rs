use crate::{config::FieldConfig, types::RegionRect};
use glam::Vec2;
use rand::Rng;

/// A single simulated dot.
///
/// `position`, `target`, `idle_anchor` and `idle_wander_target` are in
/// percentage-of-region coordinates (conceptually [0, 100] on both
/// axes, never hard-clamped). `rendered` is the last projected pixel
/// offset relative to the region origin.
///
/// `follow_speed`, `idle_speed` and `attraction_radius` are fixed for
/// the particle's lifetime; `idle_anchor` changes only under
/// [`ParticleField::recalibrate`]. `position` is advanced exclusively
/// by [`crate::sim::tick`], once per tick, by exponential interpolation
/// toward `target`.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub target: Vec2,
    pub idle_anchor: Vec2,
    pub idle_wander_target: Vec2,
    pub follow_speed: f32,
    pub idle_speed: f32,
    pub attraction_radius: f32,
    pub rendered: Vec2,
}

impl Particle {
    /// Draws a particle with randomized parameters.
    ///
    /// `position` and `idle_anchor` are uniform over [0, 100]² and the
    /// behavioral parameters come from the bands in `cfg`. The initial
    /// wander target is the anchor plus a `±cfg.wander_range` offset
    /// per axis.
    ///
    /// ### Parameters
    /// - `cfg` - Parameter bands to draw from.
    /// - `rng` - Random source; inject a seeded RNG for deterministic
    ///   trajectories.
    pub fn random(cfg: &FieldConfig, rng: &mut impl Rng) -> Self {
        let position = Vec2::new(
            rng.random_range(0.0..=100.0),
            rng.random_range(0.0..=100.0),
        );
        let idle_anchor = Vec2::new(
            rng.random_range(0.0..=100.0),
            rng.random_range(0.0..=100.0),
        );

        let mut p = Self {
            position,
            target: idle_anchor,
            idle_anchor,
            idle_wander_target: idle_anchor,
            follow_speed: rng.random_range(cfg.follow_speed_min..=cfg.follow_speed_max),
            idle_speed: rng.random_range(cfg.idle_speed_min..=cfg.idle_speed_max),
            attraction_radius: rng
                .random_range(cfg.attraction_radius_min..=cfg.attraction_radius_max),
            rendered: Vec2::ZERO,
        };
        p.retarget_wander(cfg.wander_range, rng);
        p
    }

    /// Re-draws the wander target as the anchor plus a uniform offset
    /// in `[-range, range]` on each axis.
    pub fn retarget_wander(&mut self, range: f32, rng: &mut impl Rng) {
        let offset = Vec2::new(
            rng.random_range(-range..=range),
            rng.random_range(-range..=range),
        );
        self.idle_wander_target = self.idle_anchor + offset;
    }
}

/// The ordered collection of all particles for one session.
///
/// Created empty, populated once via [`ParticleField::populate`], and
/// advanced by [`crate::sim::tick`]. No other code mutates particle
/// positions after creation.
#[derive(Debug, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of particles the density formula requests for a viewport.
    ///
    /// `floor(width * height / cfg.density_divisor)`, clamped to
    /// `cfg.max_particles`. A degenerate viewport yields zero.
    pub fn particle_count_for(viewport: Vec2, cfg: &FieldConfig) -> usize {
        if viewport.x <= 0.0 || viewport.y <= 0.0 || cfg.density_divisor <= 0.0 {
            return 0;
        }
        let requested = (viewport.x * viewport.y / cfg.density_divisor).floor() as usize;
        requested.min(cfg.max_particles)
    }

    /// One-time population sized to the viewport.
    ///
    /// Idempotent: if the field already holds particles this does
    /// nothing, so repeated mount signals cannot duplicate the
    /// population.
    ///
    /// ### Returns
    /// The number of particles created (zero when already populated).
    pub fn populate(&mut self, viewport: Vec2, cfg: &FieldConfig, rng: &mut impl Rng) -> usize {
        if !self.particles.is_empty() {
            return 0;
        }

        let count = Self::particle_count_for(viewport, cfg);
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::random(cfg, rng));
        }

        log::debug!(
            "populated field: {} particles for {}x{} viewport",
            count,
            viewport.x,
            viewport.y
        );
        count
    }

    /// Projects every particle's percentage position to a pixel offset
    /// against `region`, writing [`Particle::rendered`].
    ///
    /// Skipped entirely when the region has no usable area.
    pub fn layout(&mut self, region: &RegionRect) {
        if !region.is_usable() {
            return;
        }
        for p in &mut self.particles {
            p.rendered = region.percent_to_offset(p.position);
        }
    }

    /// Rewrites percentage coordinates after a region resize.
    ///
    /// Each particle's current rendered pixel offset is re-expressed as
    /// a percentage of the new rectangle and stored as both `position`
    /// and `idle_anchor`, so the dot stays visually in place instead of
    /// re-randomizing. Runs to completion within the caller's resize
    /// notification, so the tick never observes a half-rewritten field.
    pub fn recalibrate(&mut self, new_region: &RegionRect) {
        if !new_region.is_usable() {
            return;
        }
        for p in &mut self.particles {
            let pct = new_region.offset_to_percent(p.rendered);
            p.position = pct;
            p.idle_anchor = pct;
        }
        log::debug!(
            "recalibrated {} particles to {}x{} region",
            self.particles.len(),
            new_region.size.x,
            new_region.size.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn random_particles_start_inside_the_unit_region() {
        let cfg = FieldConfig::default();
        let mut rng = seeded();

        for _ in 0..200 {
            let p = Particle::random(&cfg, &mut rng);

            assert!(p.position.x >= 0.0 && p.position.x <= 100.0);
            assert!(p.position.y >= 0.0 && p.position.y <= 100.0);
            assert!(p.idle_anchor.x >= 0.0 && p.idle_anchor.x <= 100.0);
            assert!(p.idle_anchor.y >= 0.0 && p.idle_anchor.y <= 100.0);
        }
    }

    #[test]
    fn random_parameters_stay_within_their_bands() {
        let cfg = FieldConfig::default();
        let mut rng = seeded();

        for _ in 0..200 {
            let p = Particle::random(&cfg, &mut rng);

            assert!(p.follow_speed >= cfg.follow_speed_min);
            assert!(p.follow_speed <= cfg.follow_speed_max);
            assert!(p.idle_speed >= cfg.idle_speed_min);
            assert!(p.idle_speed <= cfg.idle_speed_max);
            assert!(p.attraction_radius >= cfg.attraction_radius_min);
            assert!(p.attraction_radius <= cfg.attraction_radius_max);

            let off = p.idle_wander_target - p.idle_anchor;
            assert!(off.x.abs() <= cfg.wander_range);
            assert!(off.y.abs() <= cfg.wander_range);
        }
    }

    #[test]
    fn density_formula_requests_area_over_divisor() {
        let mut cfg = FieldConfig::default();
        cfg.density_divisor = 10_000.0;
        cfg.max_particles = 1_000; // cap out of the way

        // 1000 * 1000 / 10000 = 100.
        let n = ParticleField::particle_count_for(Vec2::new(1000.0, 1000.0), &cfg);
        assert_eq!(n, 100);
    }

    #[test]
    fn density_formula_clamps_to_max_particles() {
        let cfg = FieldConfig::default();

        // 1920 * 1080 / 15000 = 138 requested, capped at 80.
        let n = ParticleField::particle_count_for(Vec2::new(1920.0, 1080.0), &cfg);
        assert_eq!(n, cfg.max_particles);
    }

    #[test]
    fn zero_area_viewport_requests_no_particles() {
        let cfg = FieldConfig::default();
        assert_eq!(
            ParticleField::particle_count_for(Vec2::new(0.0, 1000.0), &cfg),
            0
        );
        assert_eq!(
            ParticleField::particle_count_for(Vec2::new(1000.0, 0.0), &cfg),
            0
        );
    }

    #[test]
    fn populate_is_idempotent_over_a_nonempty_field() {
        let cfg = FieldConfig::default();
        let mut rng = seeded();
        let mut field = ParticleField::new();

        let viewport = Vec2::new(1920.0, 1080.0);
        let created = field.populate(viewport, &cfg, &mut rng);
        assert!(created > 0);
        let count = field.len();

        // A second mount signal must not add anything.
        let created_again = field.populate(viewport, &cfg, &mut rng);
        assert_eq!(created_again, 0);
        assert_eq!(field.len(), count);
    }

    #[test]
    fn layout_projects_percentages_to_pixel_offsets() {
        let mut field = ParticleField::new();
        let mut p = Particle::random(&FieldConfig::default(), &mut seeded());
        p.position = Vec2::new(50.0, 25.0);
        field.particles.push(p);

        let region = RegionRect::new(Vec2::new(10.0, 10.0), Vec2::new(200.0, 100.0));
        field.layout(&region);

        assert_eq!(field.particles[0].rendered, Vec2::new(100.0, 25.0));
    }

    #[test]
    fn layout_skips_unusable_region() {
        let mut field = ParticleField::new();
        let mut p = Particle::random(&FieldConfig::default(), &mut seeded());
        p.position = Vec2::new(50.0, 50.0);
        p.rendered = Vec2::new(1.0, 2.0);
        field.particles.push(p);

        field.layout(&RegionRect::new(Vec2::ZERO, Vec2::new(0.0, 100.0)));

        // Rendered offset untouched.
        assert_eq!(field.particles[0].rendered, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn recalibrate_preserves_pixel_position_across_resize() {
        let mut field = ParticleField::new();
        let mut p = Particle::random(&FieldConfig::default(), &mut seeded());
        p.position = Vec2::new(50.0, 50.0);
        field.particles.push(p);

        let old_region = RegionRect::new(Vec2::ZERO, Vec2::new(200.0, 100.0));
        field.layout(&old_region);
        assert_eq!(field.particles[0].rendered, Vec2::new(100.0, 50.0));

        let new_region = RegionRect::new(Vec2::ZERO, Vec2::new(400.0, 200.0));
        field.recalibrate(&new_region);

        // Percentage halves, anchor follows, pixel offset unchanged.
        assert_eq!(field.particles[0].position, Vec2::new(25.0, 25.0));
        assert_eq!(field.particles[0].idle_anchor, Vec2::new(25.0, 25.0));

        field.layout(&new_region);
        assert_eq!(field.particles[0].rendered, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn recalibrate_skips_zero_area_region() {
        let mut field = ParticleField::new();
        let mut p = Particle::random(&FieldConfig::default(), &mut seeded());
        p.position = Vec2::new(40.0, 60.0);
        p.idle_anchor = Vec2::new(10.0, 20.0);
        field.particles.push(p);

        field.recalibrate(&RegionRect::new(Vec2::ZERO, Vec2::ZERO));

        assert_eq!(field.particles[0].position, Vec2::new(40.0, 60.0));
        assert_eq!(field.particles[0].idle_anchor, Vec2::new(10.0, 20.0));
    }
}
