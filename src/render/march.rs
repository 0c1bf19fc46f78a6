use crate::math::Vec3;
use crate::scene::SurfaceParams;

use super::field::signed_distance;

/// Upper bound on field evaluations per ray.
pub const MAX_STEPS: usize = 100;
/// Fraction of the sampled distance advanced per step.
pub const STEP_SCALE: f64 = 0.1;
/// Smallest step, so rays keep moving close to the surface.
pub const MIN_STEP: f64 = 0.01;

/// Marches from `origin` along the normalized `dir` and returns the first
/// sample found inside the surface.
///
/// Rays whose closest approach to the origin is farther than the undisplaced
/// radius are rejected up front. The hit is the first negative sample, not a
/// refined zero crossing, and running out of steps counts as a miss.
pub fn sphere_trace(surface: &SurfaceParams, origin: Vec3, dir: Vec3) -> Option<Vec3> {
    let along = origin.dot(dir);
    if origin.dot(origin) - along * along > surface.radius * surface.radius {
        return None;
    }

    let mut pos = origin;
    for _ in 0..MAX_STEPS {
        let d = signed_distance(surface, pos);
        if d < 0.0 {
            return Some(pos);
        }
        pos += dir * (d * STEP_SCALE).max(MIN_STEP);
    }
    None
}
