use crate::Vec3;

/// A ray in 3D space with origin, unit direction, and medium flag.
///
/// Rays represent a line starting at `origin` and traveling in `direction`.
/// The `inside` flag records whether the ray is currently traveling inside a
/// refractive medium; only the transmission path reads it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub inside: bool,
}

impl Ray {
    /// Create a new ray outside any medium.
    ///
    /// The direction is normalized. A zero-length or non-finite direction
    /// produces a degenerate ray with a zero direction, which intersects nothing.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::ZERO),
            inside: false,
        }
    }

    /// Builder method to set the inside-medium flag.
    pub fn with_inside(mut self, inside: bool) -> Self {
        self.inside = inside;
        self
    }

    /// True when the direction collapsed to zero at construction.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec3::ZERO
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation_normalizes() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(origin, Vec3::new(0.0, 4.0, 0.0));

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, Vec3::Y);
        assert!(!ray.inside);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_degenerate_direction() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
        assert!(ray.is_degenerate());

        let ray = Ray::new(Vec3::ONE, Vec3::new(f32::NAN, 0.0, 1.0));
        assert!(ray.is_degenerate());
    }

    #[test]
    fn test_with_inside_keeps_geometry() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).with_inside(true);
        assert!(ray.inside);
        assert_eq!(ray.direction, Vec3::Z);
        assert_eq!(ray.origin, Vec3::ZERO);
    }

    #[test]
    fn test_reflect() {
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }
}
