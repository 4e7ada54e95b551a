//! Ray-plane intersection.

use prism_math::{Interval, Ray, Vec3};

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-4;

/// Intersect a ray with an infinite plane through `point`.
///
/// The returned normal is always the plane's configured `normal`
/// (normalized), whichever side the ray comes from. A zero normal never hits.
pub fn hit(ray: &Ray, point: Vec3, normal: Vec3, ray_t: Interval) -> Option<(f32, Vec3)> {
    let normal = normal.try_normalize()?;

    let denom = normal.dot(ray.direction);
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let t = normal.dot(point - ray.origin) / denom;
    if t < 0.0 || !ray_t.surrounds(t) {
        return None;
    }

    Some((t, normal))
}
