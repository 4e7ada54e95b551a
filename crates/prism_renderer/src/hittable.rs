//! Hit record and closest-hit search over a scene.

use prism_core::{Geometry, Object, Scene};
use prism_math::{Interval, Ray, Vec3};

use crate::{cuboid, plane, sphere};

/// Minimum accepted hit distance. Suppresses self-intersection when a
/// secondary ray starts on the surface it just left.
pub const HIT_EPSILON: f32 = 0.001;

/// Record of a ray-object intersection.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit surface normal
    pub normal: Vec3,
    /// Whether the ray arrived from the side the normal points to
    pub front_face: bool,
    /// The object that was hit
    pub object: &'a Object,
}

impl<'a> Hit<'a> {
    /// Build a hit at parameter `t` with an outward normal.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, object: &'a Object) -> Self {
        Self {
            t,
            point: ray.at(t),
            normal: outward_normal,
            front_face: ray.direction.dot(outward_normal) < 0.0,
            object,
        }
    }
}

/// Find the closest hit along `ray` with `t > HIT_EPSILON`.
///
/// Linear scan over every object. Degenerate rays (zero direction) hit
/// nothing.
pub fn intersect_scene<'a>(ray: &Ray, scene: &'a Scene) -> Option<Hit<'a>> {
    if ray.is_degenerate() {
        return None;
    }

    let mut closest: Option<Hit<'a>> = None;
    let mut closest_so_far = f32::INFINITY;

    for object in &scene.objects {
        let interval = Interval::new(HIT_EPSILON, closest_so_far);
        if let Some(hit) = intersect_object(ray, object, interval) {
            closest_so_far = hit.t;
            closest = Some(hit);
        }
    }

    closest
}

/// Closest-hit queries directly on a [`Scene`].
pub trait SceneIntersect {
    /// Same as [`intersect_scene`] with `self` as the scene.
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>>;
}

impl SceneIntersect for Scene {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        intersect_scene(ray, self)
    }
}

/// Dispatch to the primitive test matching the object's geometry.
///
/// Geometry coordinates are offset by the object position.
pub fn intersect_object<'a>(ray: &Ray, object: &'a Object, ray_t: Interval) -> Option<Hit<'a>> {
    match object.geometry {
        Geometry::Sphere { center, radius } => {
            sphere::hit(ray, object.position + center, radius, ray_t)
                .map(|(t, n)| Hit::new(ray, t, n, object))
        }
        Geometry::Plane { point, normal } => {
            plane::hit(ray, object.position + point, normal, ray_t)
                .map(|(t, n)| Hit::new(ray, t, n, object))
        }
        Geometry::Box {
            center,
            half_extents,
        } => cuboid::hit(ray, object.position + center, half_extents, ray_t)
            .map(|(t, n)| Hit::new(ray, t, n, object)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::Material;
    use std::sync::Arc;

    fn sphere_at(z: f32) -> Object {
        Object::new(Geometry::sphere(Vec3::ZERO, 1.0), Arc::new(Material::new()))
            .with_position(Vec3::new(0.0, 0.0, z))
    }

    #[test]
    fn test_closest_hit_wins_regardless_of_order() {
        let scene = Scene::new()
            .with_object(sphere_at(-10.0))
            .with_object(sphere_at(-4.0))
            .with_object(sphere_at(-7.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = intersect_scene(&ray, &scene).unwrap();

        assert!((hit.t - 3.0).abs() < 1e-4);
        assert!(std::ptr::eq(hit.object, &scene.objects[1]));
        assert!(hit.front_face);
    }

    #[test]
    fn test_scene_intersect_matches_free_function() {
        let scene = Scene::new()
            .with_object(sphere_at(-4.0))
            .with_object(sphere_at(-7.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let via_trait = scene.intersect(&ray).unwrap();
        let direct = intersect_scene(&ray, &scene).unwrap();
        assert_eq!(via_trait.t, direct.t);
        assert!(std::ptr::eq(via_trait.object, &scene.objects[0]));
        assert!(scene.intersect(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
    }

    #[test]
    fn test_empty_scene_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(intersect_scene(&ray, &Scene::new()).is_none());
    }

    #[test]
    fn test_degenerate_ray_misses() {
        let scene = Scene::new().with_object(sphere_at(0.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(intersect_scene(&ray, &scene).is_none());
    }

    #[test]
    fn test_hits_within_epsilon_are_ignored() {
        // Ray starting on the plane surface must not hit it again.
        let scene = Scene::new().with_object(Object::new(
            Geometry::plane(Vec3::ZERO, Vec3::Y),
            Arc::new(Material::new()),
        ));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));
        assert!(intersect_scene(&ray, &scene).is_none());
    }

    #[test]
    fn test_position_offsets_geometry() {
        let scene = Scene::new().with_object(
            Object::new(
                Geometry::cuboid(Vec3::ZERO, Vec3::splat(0.5)),
                Arc::new(Material::new()),
            )
            .with_position(Vec3::new(3.0, 0.0, 0.0)),
        );

        let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = intersect_scene(&ray, &scene).unwrap();
        assert!((hit.t - 4.5).abs() < 1e-4);
        assert!((hit.normal - Vec3::Z).length() < 1e-4);
    }
}
