use crate::math::Vec3;
use crate::noise::fractal_noise;
use crate::scene::SurfaceParams;

/// Signed distance from `pos` to the displaced sphere: negative inside,
/// positive outside.
///
/// Displacement only ever pulls the surface inward, by at most
/// `noise_amplitude`.
pub fn signed_distance(surface: &SurfaceParams, pos: Vec3) -> f64 {
    let displacement = -fractal_noise(pos * surface.noise_frequency) * surface.noise_amplitude;
    pos.length() - surface.radius - displacement
}

/// Surface normal from forward differences of the field.
///
/// The offset is one-sided, so the estimate is biased by half a step along
/// each axis.
pub fn normal(surface: &SurfaceParams, pos: Vec3, epsilon: f64) -> Vec3 {
    let d = signed_distance(surface, pos);
    let dx = signed_distance(surface, pos + Vec3::new(epsilon, 0.0, 0.0)) - d;
    let dy = signed_distance(surface, pos + Vec3::new(0.0, epsilon, 0.0)) - d;
    let dz = signed_distance(surface, pos + Vec3::new(0.0, 0.0, epsilon)) - d;
    Vec3::new(dx, dy, dz).normalize()
}
