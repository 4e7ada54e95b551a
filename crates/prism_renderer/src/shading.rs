//! Surface shading: Lambertian diffuse, GGX specular, and transmission.
//!
//! The outgoing radiance at a hit is composed as
//!
//! ```text
//! diffuse * (1 - metalness) + specular + transmission + emission
//! ```
//!
//! This blend is not energy conserving. Secondary rays for refraction and
//! total internal reflection go back through the [`Tracer`] handed in by the
//! integrator; the evaluator never owns the recursion itself.

use std::f32::consts::PI;

use prism_core::{Color, Light, Scene};
use prism_math::{reflect, Ray, Vec3};

use crate::hittable::{intersect_scene, Hit};

/// Reflectance at normal incidence for dielectrics.
const DIELECTRIC_F0: f32 = 0.04;

/// Smallest GGX alpha. Keeps `a2 - 1` away from -1 in f32 so the
/// distribution stays finite at n·h = 1 for near-mirror surfaces.
const MIN_ALPHA: f32 = 1e-3;

/// Capability to trace a secondary ray with a given remaining depth.
pub trait Tracer {
    fn trace(&self, ray: &Ray, depth: u32) -> Color;
}

/// Compute the outgoing radiance estimate at a hit.
///
/// Non-finite channels in each term are replaced by zero before the terms are
/// summed, so a NaN from a grazing-angle computation never reaches the
/// framebuffer and never cancels the other contributions.
pub fn evaluate(ray: &Ray, hit: &Hit, scene: &Scene, depth: u32, tracer: &dyn Tracer) -> Color {
    let material = &hit.object.material;

    let diffuse = diffuse(hit, scene);
    let specular = specular(ray, hit, scene);
    let transmission = transmission(ray, hit, depth, tracer);

    // Sanitize per term: a non-finite lobe must not zero the others.
    sanitize(
        sanitize(diffuse) * (1.0 - material.metalness)
            + sanitize(specular)
            + sanitize(transmission)
            + material.emission,
    )
}

/// Lambertian term summed over lights, with hard shadows.
pub fn diffuse(hit: &Hit, scene: &Scene) -> Color {
    let albedo = hit.object.material.albedo;
    let mut sum = Color::ZERO;

    for light in &scene.lights {
        match visible_direction(light, hit.point, scene) {
            LightVisibility::Ambient(color) => sum += albedo * color,
            LightVisibility::Visible(dir, color) => {
                let n_dot_l = hit.normal.dot(dir).max(0.0);
                sum += albedo * color * n_dot_l;
            }
            LightVisibility::Occluded => {}
        }
    }

    sum / PI
}

/// GGX specular term with Schlick Fresnel, summed over unshadowed lights.
///
/// Zero when roughness is not positive.
pub fn specular(ray: &Ray, hit: &Hit, scene: &Scene) -> Color {
    let material = &hit.object.material;
    if material.roughness <= 0.0 {
        return Color::ZERO;
    }

    let n = hit.normal;
    let view = -ray.direction;
    let n_dot_v = n.dot(view).max(0.0);

    let f0 = Color::splat(DIELECTRIC_F0).lerp(material.albedo, material.metalness);
    let fresnel = fresnel_schlick(f0, n_dot_v);

    let mut lobe = Color::ZERO;
    for light in &scene.lights {
        if let LightVisibility::Visible(dir, color) = visible_direction(light, hit.point, scene) {
            let halfway = (view + dir).normalize_or_zero();
            let n_dot_h = n.dot(halfway).max(0.0);
            let n_dot_l = n.dot(dir).max(0.0);
            lobe += color * (ggx_distribution(n_dot_h, material.roughness) * n_dot_l);
        }
    }

    fresnel * lobe
}

/// Refracted (or totally internally reflected) contribution.
///
/// Only evaluated when the material transmits and depth remains. Every
/// secondary ray is traced with `depth - 1`.
pub fn transmission(ray: &Ray, hit: &Hit, depth: u32, tracer: &dyn Tracer) -> Color {
    let material = &hit.object.material;
    if material.transmission <= 0.0 || depth == 0 {
        return Color::ZERO;
    }

    let (n1, n2) = if ray.inside {
        (material.ior, 1.0)
    } else {
        (1.0, material.ior)
    };
    let eta = n1 / n2;

    // Orient the normal against the incoming ray
    let n = if ray.direction.dot(hit.normal) > 0.0 {
        -hit.normal
    } else {
        hit.normal
    };

    match refract(ray.direction, n, eta) {
        Some(direction) => {
            let refracted = Ray::new(hit.point, direction).with_inside(!ray.inside);
            tracer.trace(&refracted, depth - 1) * material.transmission
        }
        None => {
            // Total internal reflection
            let reflected = Ray::new(hit.point, reflect(ray.direction, n)).with_inside(ray.inside);
            tracer.trace(&reflected, depth - 1)
        }
    }
}

/// Refract a unit direction through a surface with normal `n` facing the ray.
///
/// `eta` is n1/n2. Returns `None` on total internal reflection, i.e. when the
/// transmitted sine would reach 1.
pub fn refract(direction: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = (-direction.dot(n)).clamp(-1.0, 1.0);
    let sin_i = (1.0 - cos_i * cos_i).max(0.0).sqrt();
    let sin_t = eta * sin_i;
    if sin_t >= 1.0 {
        return None;
    }

    let cos_t = (1.0 - sin_t * sin_t).max(0.0).sqrt();
    Some(eta * direction + (eta * cos_i - cos_t) * n)
}

/// Schlick Fresnel approximation.
#[inline]
pub fn fresnel_schlick(f0: Color, n_dot_v: f32) -> Color {
    let x = (1.0 - n_dot_v).clamp(0.0, 1.0);
    let x2 = x * x;
    f0 + (Color::ONE - f0) * (x2 * x2 * x) // (1 - n_dot_v)^5
}

/// GGX/Trowbridge-Reitz distribution with alpha = roughness².
///
/// Alpha is clamped to `MIN_ALPHA`, so the result is finite for any
/// roughness in [0, 1].
#[inline]
pub fn ggx_distribution(n_dot_h: f32, roughness: f32) -> f32 {
    let alpha = (roughness * roughness).max(MIN_ALPHA);
    let a2 = alpha * alpha;
    let denom = (n_dot_h * n_dot_h * (a2 - 1.0) + 1.0).max(1e-7);
    a2 / (PI * denom * denom)
}

/// Replace non-finite channels with zero.
#[inline]
pub fn sanitize(color: Color) -> Color {
    Color::new(
        finite_or_zero(color.x),
        finite_or_zero(color.y),
        finite_or_zero(color.z),
    )
}

#[inline]
fn finite_or_zero(x: f32) -> f32 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

enum LightVisibility {
    Ambient(Color),
    Visible(Vec3, Color),
    Occluded,
}

/// Direction toward a light and whether anything blocks it.
fn visible_direction(light: &Light, point: Vec3, scene: &Scene) -> LightVisibility {
    let color = light.color();
    let (to_light, distance) = match *light {
        Light::Ambient { .. } => return LightVisibility::Ambient(color),
        Light::Point { position, .. } => {
            let offset = position - point;
            (offset, offset.length())
        }
        Light::Directional { position, .. } => (position, f32::INFINITY),
    };

    let shadow_ray = Ray::new(point, to_light);
    if shadow_ray.is_degenerate() {
        // Light sits on the surface point (or has no direction): no lighting.
        return LightVisibility::Occluded;
    }

    match intersect_scene(&shadow_ray, scene) {
        Some(blocker) if blocker.t < distance => LightVisibility::Occluded,
        _ => LightVisibility::Visible(shadow_ray.direction, color),
    }
}
