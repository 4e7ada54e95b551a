//! Ray-sphere intersection.

use prism_math::{Interval, Ray, Vec3};

/// Intersect a ray with a world-space sphere.
///
/// Returns `(t, outward_normal)` for the nearest root inside `ray_t`.
/// Non-positive radii never hit.
pub fn hit(ray: &Ray, center: Vec3, radius: f32, ray_t: Interval) -> Option<(f32, Vec3)> {
    if radius <= 0.0 {
        return None;
    }

    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (-b - sqrtd) / (2.0 * a);
    if !ray_t.surrounds(root) {
        root = (-b + sqrtd) / (2.0 * a);
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let normal = (ray.at(root) - center).normalize();
    Some((root, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HIT_EPSILON;

    fn forward() -> Interval {
        Interval::new(HIT_EPSILON, f32::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let (t, normal) = hit(&ray, Vec3::ZERO, 1.0, forward()).unwrap();

        assert!((t - 4.0).abs() < 1e-5);
        assert!((ray.at(t) - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!((normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Y);
        assert!(hit(&ray, Vec3::ZERO, 1.0, forward()).is_none());

        // Sphere entirely behind the origin
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(hit(&ray, Vec3::ZERO, 1.0, forward()).is_none());
    }

    #[test]
    fn test_sphere_from_inside_uses_far_root() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let (t, normal) = hit(&ray, Vec3::ZERO, 2.0, forward()).unwrap();

        assert!((t - 2.0).abs() < 1e-5);
        // Still the outward normal
        assert!((normal - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_radius() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(hit(&ray, Vec3::ZERO, 0.0, forward()).is_none());
        assert!(hit(&ray, Vec3::ZERO, -1.0, forward()).is_none());
    }
}
