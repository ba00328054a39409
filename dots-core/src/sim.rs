//! Per-tick advancement of the particle field.
//!
//! The host schedules [`tick`] once per display-refresh frame,
//! indefinitely. Each tick:
//! 1. Resolves the pointer into region-relative percentage units
//!    (when it is inside the region).
//! 2. Classifies every particle as attracted, idle-returning or
//!    idle-wandering — re-evaluated from scratch every tick, with no
//!    hysteresis.
//! 3. Interpolates `position` toward the chosen `target` and projects
//!    the result to a pixel offset against the current region.
//!
//! A missing or zero-area region skips all per-particle work for that
//! tick; the host reschedules unconditionally either way.

use crate::{
    config::FieldConfig,
    particle::{Particle, ParticleField},
    pointer::PointerState,
    types::RegionRect,
};
use glam::Vec2;
use rand::Rng;

/// Motion regime chosen for one particle on one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Pointer inside the region and within this particle's radius.
    /// `strength` is 1 at distance 0 and 0 at the radius edge.
    Attracted { strength: f32 },
    /// Pointer inside the region but beyond the radius; the particle
    /// heads back to its idle anchor.
    Returning,
    /// Pointer outside the region; the particle drifts toward its
    /// wander target.
    Wandering,
}

/// Classifies a particle against the current pointer sample.
///
/// `pointer_pct` is the pointer in region-relative percentage units,
/// or `None` when the pointer is outside the region. The comparison
/// uses a strict `<`, so a particle exactly at the radius boundary may
/// flip between [`Motion::Attracted`] and [`Motion::Returning`] on
/// consecutive ticks; that flicker is accepted behavior.
pub fn classify(particle: &Particle, pointer_pct: Option<Vec2>) -> Motion {
    match pointer_pct {
        Some(ptr) => {
            let d = particle.position.distance(ptr);
            if d < particle.attraction_radius {
                Motion::Attracted {
                    strength: 1.0 - d / particle.attraction_radius,
                }
            } else {
                Motion::Returning
            }
        }
        None => Motion::Wandering,
    }
}

/// Advances every particle by one simulation step and writes its
/// rendered pixel offset.
///
/// For each particle, depending on its classification:
///
/// - **Attracted**: the target is a point `cfg.standoff_distance`
///   units from the pointer along the pointer→particle line. The
///   effective rate is
///   `follow_speed * (0.3 + 0.7 * strength) * (0.5 + 0.5 * easing)`,
///   where `easing` is the remaining distance to the target over
///   `cfg.easing_range`, capped at 1.
/// - **Returning**: the target is the idle anchor, at `idle_speed`.
/// - **Wandering**: the target is the wander target, at `idle_speed`;
///   with probability `cfg.retarget_probability` the wander target is
///   first re-drawn around the anchor, producing slow unbounded drift
///   bounded only by the periodic re-anchoring.
///
/// In every case `position += (target - position) * rate`, then the
/// pixel offset is recomputed against `region` (re-measured by the
/// caller each tick, since host layout may change between frames).
///
/// ### Parameters
/// - `field` - The particle population; positions and rendered offsets
///   are updated in place.
/// - `pointer` - Latest pointer sample; read only.
/// - `region` - Current region rectangle, or `None` before layout.
/// - `cfg` - Global tuning constants.
/// - `rng` - Random source for wander retargeting.
///
/// ### Returns
/// `true` if particle work ran, `false` for a skipped tick (missing or
/// zero-area region, or an empty field). The caller must reschedule
/// the next tick regardless of the result.
pub fn tick(
    field: &mut ParticleField,
    pointer: &PointerState,
    region: Option<&RegionRect>,
    cfg: &FieldConfig,
    rng: &mut impl Rng,
) -> bool {
    let Some(region) = region.filter(|r| r.is_usable()) else {
        log::trace!("tick skipped: region unavailable");
        return false;
    };
    if field.is_empty() {
        return false;
    }

    let pointer_pct = pointer
        .inside_region
        .then(|| pointer.region_percent(region));
    let retarget_p = cfg.retarget_probability.clamp(0.0, 1.0);

    for p in &mut field.particles {
        let rate = match classify(p, pointer_pct) {
            Motion::Attracted { strength } => {
                // classify only returns Attracted for an in-region pointer.
                let ptr = pointer_pct.unwrap_or(p.position);
                // Stand off along the pointer→particle line; for a
                // pointer exactly on the particle the direction is
                // degenerate, so push along +x.
                let dir = (p.position - ptr).try_normalize().unwrap_or(Vec2::X);
                p.target = ptr + dir * cfg.standoff_distance;

                let remaining = p.position.distance(p.target);
                let easing = (remaining / cfg.easing_range).min(1.0);
                p.follow_speed * (0.3 + 0.7 * strength) * (0.5 + 0.5 * easing)
            }
            Motion::Returning => {
                p.target = p.idle_anchor;
                p.idle_speed
            }
            Motion::Wandering => {
                if rng.random_bool(retarget_p) {
                    p.retarget_wander(cfg.wander_range, rng);
                }
                p.target = p.idle_wander_target;
                p.idle_speed
            }
        };

        p.position += (p.target - p.position) * rate;
        p.rendered = region.percent_to_offset(p.position);
    }

    true
}
