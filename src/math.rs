use glam::DVec3;

/// Vector type used throughout the renderer.
///
/// Addition, subtraction, scalar multiply/divide, `dot`, `cross`, `lerp`,
/// `length` and `normalize` come straight from glam. `lerp` does not clamp
/// its factor, and normalizing a zero vector yields NaN components.
pub type Vec3 = DVec3;

/// Operations the renderer needs that glam does not name the same way.
pub trait VectorExt {
    /// Component-wise product.
    fn hadamard(self, other: Self) -> Self;
    /// Clamps every component to `[min, max]`. NaN components end up at `max`.
    fn clamp_scalar(self, min: f64, max: f64) -> Self;
    /// Euclidean length.
    fn magnitude(self) -> f64;
    /// Normalizes and rescales to `length`. Zero vectors produce NaN.
    fn normalize_to(self, length: f64) -> Self;
}

impl VectorExt for Vec3 {
    #[inline]
    fn hadamard(self, other: Self) -> Self {
        self * other
    }

    #[inline]
    fn clamp_scalar(self, min: f64, max: f64) -> Self {
        let clamp = |value: f64| value.min(max).max(min);
        Vec3::new(clamp(self.x), clamp(self.y), clamp(self.z))
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.length()
    }

    #[inline]
    fn normalize_to(self, length: f64) -> Self {
        (self / self.magnitude()) * length
    }
}
