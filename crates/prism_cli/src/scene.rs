//! Built-in scenes for the command line renderer.

use std::sync::Arc;

use prism_core::{Color, Geometry, Light, Material, Object, Scene};
use prism_math::{Camera, Vec3};

/// Camera placement shared by every preset.
pub const CAMERA_POSITION: Vec3 = Vec3::new(2.0, 2.0, 5.0);
pub const CAMERA_FOV: f32 = 60.0;

/// Ambient light level (0x404040).
const AMBIENT: f32 = 64.0 / 255.0;

/// Available built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenePreset {
    /// Floor plane and a red metallic sphere under a directional light.
    Basic,
    /// The basic scene plus a glass sphere, a glossy box and a small emitter.
    Showcase,
}

impl ScenePreset {
    pub fn build(self) -> Scene {
        match self {
            ScenePreset::Basic => basic_scene(),
            ScenePreset::Showcase => showcase_scene(),
        }
    }
}

/// Camera at the preset position looking at the origin.
pub fn default_camera(width: u32, height: u32) -> Camera {
    Camera::looking_at(CAMERA_POSITION, Vec3::ZERO, Vec3::Y)
        .with_fov(CAMERA_FOV)
        .with_aspect(width as f32 / height.max(1) as f32)
}

fn basic_scene() -> Scene {
    let floor = Material::new()
        .with_albedo(Color::ONE)
        .with_roughness(0.1)
        .with_metalness(0.0);
    let red_metal = Material::new()
        .with_albedo(Color::new(1.0, 0.0, 0.0))
        .with_roughness(0.2)
        .with_metalness(0.8);

    Scene::new()
        .with_object(Object::new(Geometry::plane(Vec3::ZERO, Vec3::Y), Arc::new(floor)))
        .with_object(
            Object::new(Geometry::sphere(Vec3::ZERO, 1.0), Arc::new(red_metal))
                .with_position(Vec3::new(0.0, 1.0, 0.0)),
        )
        .with_light(Light::Directional {
            position: Vec3::new(5.0, 5.0, 5.0),
            color: Color::ONE,
        })
        .with_light(Light::Ambient {
            color: Color::splat(AMBIENT),
        })
}

fn showcase_scene() -> Scene {
    let glass = Arc::new(Material::glass().with_roughness(0.0));
    let box_material = Arc::new(Material::glossy().with_albedo(Color::new(0.1, 0.4, 0.9)));
    let lamp = Arc::new(Material::emissive().with_emission(Color::new(4.0, 3.6, 3.0)));

    basic_scene()
        .with_object(
            Object::new(Geometry::sphere(Vec3::ZERO, 0.6), glass)
                .with_position(Vec3::new(1.6, 0.6, 1.2)),
        )
        .with_object(
            Object::new(Geometry::cuboid(Vec3::ZERO, Vec3::splat(0.5)), box_material)
                .with_position(Vec3::new(-1.8, 0.5, 0.2)),
        )
        .with_object(
            Object::new(Geometry::sphere(Vec3::ZERO, 0.2), lamp)
                .with_position(Vec3::new(-0.6, 0.2, 1.8)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_scene() {
        let scene = ScenePreset::Basic.build();
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.light_count(), 2);

        let sphere = &scene.objects[1];
        assert_eq!(sphere.position, Vec3::new(0.0, 1.0, 0.0));
        assert!((sphere.material.metalness - 0.8).abs() < 1e-6);
        assert!((sphere.material.roughness - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_showcase_extends_basic() {
        let scene = ScenePreset::Showcase.build();
        assert_eq!(scene.object_count(), 5);
        assert!(scene.objects.iter().any(|o| o.material.is_transmissive()));
        assert!(scene.objects.iter().any(|o| o.material.is_emissive()));
        assert!(scene.objects.iter().any(|o| o.geometry.kind() == "box"));
    }

    #[test]
    fn test_default_camera_aspect() {
        let camera = default_camera(640, 480);
        assert_eq!(camera.position, CAMERA_POSITION);
        assert!((camera.aspect - 640.0 / 480.0).abs() < 1e-6);
        assert!((camera.fov_y - CAMERA_FOV).abs() < 1e-6);
    }
}
