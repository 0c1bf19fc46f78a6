use crate::math::{Vec3, VectorExt};
use crate::scene::Scene;

use super::field;

/// Flat color for rays that miss the surface.
pub const BACKGROUND: Vec3 = Vec3::new(0.2, 0.7, 0.8);

const GRAY: Vec3 = Vec3::new(0.4, 0.4, 0.4);
const DARK_GRAY: Vec3 = Vec3::new(0.2, 0.2, 0.2);
const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const ORANGE: Vec3 = Vec3::new(1.0, 0.6, 0.0);
// Channels above 1.0 saturate in the final clamp.
const YELLOW: Vec3 = Vec3::new(1.7, 1.6, 1.0);

/// Piecewise-linear ramp gray -> dark gray -> red -> orange -> yellow over
/// four equal quartiles of `d`, clamped to `[0, 1]` first.
pub fn fire_color(d: f64) -> Vec3 {
    let x = d.min(1.0).max(0.0);
    if x < 0.25 {
        GRAY.lerp(DARK_GRAY, x * 4.0)
    } else if x < 0.5 {
        DARK_GRAY.lerp(RED, x * 4.0 - 1.0)
    } else if x < 0.75 {
        RED.lerp(ORANGE, x * 4.0 - 2.0)
    } else {
        ORANGE.lerp(YELLOW, x * 4.0 - 3.0)
    }
}

/// Color of a surface hit, clamped to `[0, 1]`.
pub fn shade_hit(scene: &Scene, hit: Vec3) -> Vec3 {
    let surface = &scene.surface;
    let normal = field::normal(surface, hit, scene.render.epsilon);
    let intensity = scene.light.intensity_at(hit, normal);
    let noise_level = (surface.radius - hit.magnitude()) / surface.noise_amplitude;
    (fire_color((noise_level - 0.2) * 2.0) * intensity).clamp_scalar(0.0, 1.0)
}

/// Color for the outcome of one marched ray.
pub fn shade(scene: &Scene, hit: Option<Vec3>) -> Vec3 {
    match hit {
        Some(point) => shade_hit(scene, point),
        None => BACKGROUND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-12
    }

    #[test]
    fn ramp_endpoints() {
        assert!(approx_eq(fire_color(0.0), GRAY));
        assert!(approx_eq(fire_color(1.0), YELLOW));
    }

    #[test]
    fn ramp_clamps_input() {
        assert!(approx_eq(fire_color(-3.0), GRAY));
        assert!(approx_eq(fire_color(7.5), YELLOW));
    }

    #[test]
    fn ramp_hits_each_stop_at_quartiles() {
        assert!(approx_eq(fire_color(0.25), DARK_GRAY));
        assert!(approx_eq(fire_color(0.5), RED));
        assert!(approx_eq(fire_color(0.75), ORANGE));
    }

    #[test]
    fn midpoint_lies_between_red_and_orange() {
        let color = fire_color(0.625);
        assert!(approx_eq(color, RED.lerp(ORANGE, 0.5)));
        assert_eq!(color.x, 1.0);
        assert!(color.y > 0.0 && color.y < 0.6);
        assert_eq!(color.z, 0.0);
    }

    #[test]
    fn ramp_warms_after_dark_gray() {
        let mut previous = fire_color(0.25).element_sum();
        for step in 1..=30 {
            let d = 0.25 + step as f64 * 0.025;
            let brightness = fire_color(d).element_sum();
            assert!(brightness >= previous - 1e-12, "ramp darkened at {d}");
            previous = brightness;
        }
    }

    #[test]
    fn miss_is_background() {
        assert_eq!(shade(&Scene::default(), None), BACKGROUND);
    }

    #[test]
    fn hits_are_clamped() {
        let scene = Scene::default();
        let hit = Vec3::new(0.0, 0.0, 1.2);
        let color = shade(&scene, Some(hit));
        for channel in color.to_array() {
            assert!((0.0..=1.0).contains(&channel));
        }
    }
}
