//! Core ray integrator.
//!
//! Implements recursive Whitted-style tracing with:
//! - Depth-bounded recursion through the shading evaluator
//! - Anti-aliasing via jittered multi-sampling
//! - Clamped 8-bit RGBA output

use prism_core::{Color, Scene};
use prism_math::{Camera, Interval, Ray};
use rand::{Rng, RngCore};

use crate::error::{RenderError, RenderResult};
use crate::hittable::SceneIntersect;
use crate::shading::{self, sanitize, Tracer};

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Maximum recursion depth for secondary rays
    pub max_depth: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Worker count; `None` uses the available hardware parallelism
    pub workers: Option<usize>,
    /// Frame seed; `None` draws one from entropy
    pub seed: Option<u64>,
    /// How many times a failed tile is resubmitted
    pub tile_retries: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            max_depth: 5,
            samples_per_pixel: 4,
            workers: None,
            seed: None,
            tile_retries: 1,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the frame seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if self.workers == Some(0) {
            return Err(RenderError::ZeroWorkers);
        }
        Ok(())
    }
}

/// Recursive tracer over a read-only scene.
#[derive(Clone, Copy)]
pub struct Integrator<'a> {
    scene: &'a Scene,
}

impl<'a> Integrator<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Compute the color seen by a ray with `depth` levels of recursion left.
    ///
    /// Depth 0 is black. A miss returns the scene background. A hit is
    /// shaded with the same depth; the evaluator decrements it for every
    /// secondary ray it spawns.
    pub fn trace_ray(&self, ray: &Ray, depth: u32) -> Color {
        if depth == 0 {
            return Color::ZERO;
        }

        match self.scene.intersect(ray) {
            Some(hit) => shading::evaluate(ray, &hit, self.scene, depth, self),
            None => self.scene.background,
        }
    }
}

impl Tracer for Integrator<'_> {
    fn trace(&self, ray: &Ray, depth: u32) -> Color {
        self.trace_ray(ray, depth)
    }
}

/// Render a single pixel with jittered multi-sampling.
///
/// Pixel (0, 0) is the top-left corner of the image.
pub fn render_pixel(
    integrator: &Integrator,
    camera: &Camera,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let u = (x as f32 + rng.gen::<f32>()) / config.width as f32;
        let v = 1.0 - (y as f32 + rng.gen::<f32>()) / config.height as f32;
        let ray = camera.generate_ray(u, v);
        pixel_color += integrator.trace_ray(&ray, config.max_depth);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Convert a color to 8-bit RGBA: clamp to [0, 1], then floor(c * 255).
///
/// Non-finite channels map to 0. Alpha is always 255.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = sanitize(color);
    let quantize = |x: f32| (255.0 * Interval::UNIT.clamp(x)) as u8;
    [quantize(c.x), quantize(c.y), quantize(c.z), 255]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Geometry, Light, Material, Object};
    use prism_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn sphere_scene() -> Scene {
        Scene::new()
            .with_object(Object::new(
                Geometry::sphere(Vec3::new(0.0, 0.0, -3.0), 1.0),
                Arc::new(Material::matte().with_albedo(Color::ONE)),
            ))
            .with_light(Light::Point {
                position: Vec3::new(0.0, 0.0, 5.0),
                color: Color::ONE,
            })
            .with_background(Color::new(0.2, 0.3, 0.4))
    }

    #[test]
    fn test_depth_zero_is_black() {
        let scene = sphere_scene().with_object(Object::new(
            Geometry::sphere(Vec3::ZERO, 10.0),
            Arc::new(Material::emissive()),
        ));
        let integrator = Integrator::new(&scene);

        let toward = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let away = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(integrator.trace_ray(&toward, 0), Color::ZERO);
        assert_eq!(integrator.trace_ray(&away, 0), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = sphere_scene();
        let integrator = Integrator::new(&scene);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(integrator.trace_ray(&ray, 5), Color::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_hit_is_shaded() {
        let scene = sphere_scene();
        let integrator = Integrator::new(&scene);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let color = integrator.trace_ray(&ray, 5);
        // Front of the sphere faces the light head on: albedo / π plus specular.
        assert!(color.x >= 1.0 / std::f32::consts::PI - 1e-4);
        assert_ne!(color, scene.background);
    }

    #[test]
    fn test_glass_recursion_reaches_background() {
        // A transmissive sphere with nothing else around refracts through to the background.
        let scene = Scene::new()
            .with_object(Object::new(
                Geometry::sphere(Vec3::new(0.0, 0.0, -3.0), 1.0),
                Arc::new(Material::glass().with_roughness(0.0)),
            ))
            .with_background(Color::ONE);
        let integrator = Integrator::new(&scene);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        // Enter, exit, escape: three levels are enough, two are not.
        assert!((integrator.trace_ray(&ray, 3) - Color::ONE).length() < 1e-4);
        assert_eq!(integrator.trace_ray(&ray, 2), Color::ZERO);
    }

    #[test]
    fn test_render_pixel_averages_samples() {
        let scene = Scene::new().with_background(Color::new(0.5, 0.25, 1.0));
        let integrator = Integrator::new(&scene);
        let camera = Camera::default();
        let config = RenderConfig::default()
            .with_resolution(10, 10)
            .with_quality(8, 5);
        let mut rng = StdRng::seed_from_u64(42);

        let color = render_pixel(&integrator, &camera, 5, 5, &config, &mut rng);
        assert!((color - Color::new(0.5, 0.25, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 0.5)), [255, 0, 127, 255]);
        assert_eq!(color_to_rgba(Color::new(f32::NAN, 0.0, 0.0)), [0, 0, 0, 255]);
    }

    #[test]
    fn test_validate() {
        assert!(RenderConfig::default().validate().is_ok());
        assert!(matches!(
            RenderConfig::default().with_resolution(0, 10).validate(),
            Err(RenderError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(matches!(
            RenderConfig::default().with_quality(0, 5).validate(),
            Err(RenderError::ZeroSamples)
        ));
        assert!(matches!(
            RenderConfig::default().with_workers(0).validate(),
            Err(RenderError::ZeroWorkers)
        ));
    }
}
