//! Value noise and its fractal sum, used to displace the sphere surface.
//!
//! Nothing here is seeded: every function is a pure function of its input,
//! so renders are reproducible bit for bit.

use crate::math::Vec3;

/// Lattice stride per axis used to fold a 3D cell into one scalar.
const LATTICE_STRIDE: Vec3 = Vec3::new(1.0, 57.0, 113.0);

/// Per-octave weights. Their sum is [`WEIGHT_SUM`].
const OCTAVE_WEIGHTS: [f64; 4] = [0.5, 0.25, 0.125, 0.0625];

/// Frequency multipliers applied between consecutive octaves.
const OCTAVE_LACUNARITY: [f64; 3] = [2.32, 3.03, 2.61];

const WEIGHT_SUM: f64 = 0.9375;

/// Pseudo-random value in `[0, 1)` derived from `n`.
///
/// Not suitable for anything but visual noise.
#[inline]
pub fn hash(n: f64) -> f64 {
    let x = n.sin() * 43758.5453;
    let fract = x - x.floor();
    // Tiny negative `x` rounds `x + 1` up to exactly 1.0.
    if fract >= 1.0 {
        0.0
    } else {
        fract
    }
}

/// Trilinearly interpolated lattice noise in `[0, 1)`.
pub fn value_noise(p: Vec3) -> f64 {
    let cell = p.floor();
    let f = p - cell;
    let f = (Vec3::splat(3.0) - f * 2.0) * f * f;
    let n = cell.dot(LATTICE_STRIDE);

    mix(
        mix(
            mix(hash(n), hash(n + 1.0), f.x),
            mix(hash(n + 57.0), hash(n + 58.0), f.x),
            f.y,
        ),
        mix(
            mix(hash(n + 113.0), hash(n + 114.0), f.x),
            mix(hash(n + 170.0), hash(n + 171.0), f.x),
            f.y,
        ),
        f.z,
    )
}

/// Fixed rotation that breaks up axis-aligned lattice artifacts.
pub fn rotate(v: Vec3) -> Vec3 {
    Vec3::new(
        Vec3::new(0.00, 0.80, 0.60).dot(v),
        Vec3::new(-0.80, 0.36, -0.48).dot(v),
        Vec3::new(-0.60, -0.48, 0.64).dot(v),
    )
}

/// Four octaves of [`value_noise`], normalized to roughly `[0, 1]`.
pub fn fractal_noise(x: Vec3) -> f64 {
    let mut p = rotate(x);
    let mut sum = OCTAVE_WEIGHTS[0] * value_noise(p);
    for (weight, lacunarity) in OCTAVE_WEIGHTS[1..].iter().zip(OCTAVE_LACUNARITY) {
        p *= lacunarity;
        sum += weight * value_noise(p);
    }
    sum / WEIGHT_SUM
}

#[inline]
fn mix(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.min(1.0).max(0.0)
}
