//! Ray-box intersection for axis-aligned boxes.

use prism_math::{Aabb, Interval, Ray, Vec3};

/// Intersect a ray with an axis-aligned box (slab method).
///
/// Only the entry distance is considered: a ray starting inside the box does
/// not hit it. Boxes with a non-positive half extent never hit.
///
/// The normal is `normalize(round((point - center) / half_extents))`. This is
/// exact at face centers but tilts toward the neighbouring face once a hit
/// point is more than half way to an edge, and is diagonal at corners.
pub fn hit(ray: &Ray, center: Vec3, half_extents: Vec3, ray_t: Interval) -> Option<(f32, Vec3)> {
    if half_extents.cmple(Vec3::ZERO).any() {
        return None;
    }

    let slabs = Aabb::from_center(center, half_extents).hit_interval(ray)?;
    let t = slabs.min;
    if !ray_t.surrounds(t) {
        return None;
    }

    let local = (ray.at(t) - center) / half_extents;
    let normal = local.round().normalize_or_zero();
    Some((t, normal))
}
