/// Tunable constants for the particle field.
///
/// All speeds and distances are expressed in percentage-of-region
/// units per tick, except `density_divisor` and `max_particles`, which
/// size the population from the viewport pixel area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    /// Viewport area (px²) per particle; count = `floor(area / divisor)`.
    pub density_divisor: f32,
    /// Hard cap on the particle count after the density formula.
    pub max_particles: usize,

    /// Band for each particle's interpolation rate while attracted.
    pub follow_speed_min: f32,
    pub follow_speed_max: f32,

    /// Band for each particle's interpolation rate while idle.
    pub idle_speed_min: f32,
    pub idle_speed_max: f32,

    /// Band for each particle's pointer-attraction radius.
    pub attraction_radius_min: f32,
    pub attraction_radius_max: f32,

    /// Gap a particle keeps from the pointer while attracted.
    pub standoff_distance: f32,
    /// Remaining distance at which the attraction easing factor saturates.
    pub easing_range: f32,

    /// Half-extent of the wander offset drawn around the idle anchor.
    pub wander_range: f32,
    /// Per-tick probability of re-drawing the wander target.
    pub retarget_probability: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density_divisor: 15_000.0,
            max_particles: 80,

            follow_speed_min: 0.012,
            follow_speed_max: 0.027,

            idle_speed_min: 0.0005,
            idle_speed_max: 0.0085,

            attraction_radius_min: 30.0,
            attraction_radius_max: 35.0,

            standoff_distance: 2.0,
            easing_range: 10.0,

            wander_range: 10.0,
            retarget_probability: 0.005,
        }
    }
}
