//! Surface material parameters.

use prism_math::Vec3;

/// Color type alias (linear RGB, conceptually in [0, ∞))
pub type Color = Vec3;

/// A physically-motivated surface description.
///
/// Materials are plain configuration: the renderer reads them, nothing
/// mutates them during tracing. They are shared between objects through
/// `Arc<Material>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Albedo / base color (RGB, 0-1)
    pub albedo: Color,

    /// Roughness factor (0=smooth, 1=rough)
    pub roughness: f32,

    /// Metalness factor (0=dielectric, 1=metal)
    pub metalness: f32,

    /// Index of refraction
    pub ior: f32,

    /// Specular weight (for non-metallic surfaces)
    pub specular: f32,

    /// Emissive color (RGB, for light-emitting surfaces)
    pub emission: Color,

    /// Transmission: 0 = opaque, 1 = fully transmissive
    pub transmission: f32,

    /// Subsurface scattering flag. Carried for front ends, not shaded.
    pub subsurface: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Color::new(0.5, 0.5, 0.5),
            roughness: 0.5,
            metalness: 0.0,
            ior: 1.5,
            specular: 0.5,
            emission: Color::ZERO,
            transmission: 0.0,
            subsurface: false,
        }
    }
}

impl Material {
    /// Create a new material with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rough, non-metallic surface.
    pub fn matte() -> Self {
        Self {
            roughness: 0.9,
            metalness: 0.0,
            ..Default::default()
        }
    }

    /// Glossy plastic-like surface.
    pub fn glossy() -> Self {
        Self {
            roughness: 0.3,
            metalness: 0.0,
            specular: 0.8,
            ..Default::default()
        }
    }

    /// Polished metal.
    pub fn metal() -> Self {
        Self {
            albedo: Color::new(0.9, 0.9, 0.9),
            roughness: 0.1,
            metalness: 1.0,
            ..Default::default()
        }
    }

    /// Clear glass with an index of refraction of 1.5.
    pub fn glass() -> Self {
        Self {
            roughness: 0.01,
            metalness: 0.0,
            ior: 1.5,
            transmission: 1.0,
            ..Default::default()
        }
    }

    /// White emitter.
    pub fn emissive() -> Self {
        Self {
            emission: Color::ONE,
            roughness: 1.0,
            ..Default::default()
        }
    }

    /// Builder method to set albedo.
    pub fn with_albedo(mut self, albedo: Color) -> Self {
        self.albedo = albedo;
        self
    }

    /// Builder method to set roughness.
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set metalness.
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set the index of refraction.
    pub fn with_ior(mut self, ior: f32) -> Self {
        self.ior = ior;
        self
    }

    /// Builder method to set specular weight.
    pub fn with_specular(mut self, specular: f32) -> Self {
        self.specular = specular.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set emission.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Builder method to set transmission.
    pub fn with_transmission(mut self, transmission: f32) -> Self {
        self.transmission = transmission.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set the subsurface flag.
    pub fn with_subsurface(mut self, subsurface: bool) -> Self {
        self.subsurface = subsurface;
        self
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.length_squared() > 0.0
    }

    /// Check if this material spawns transmission rays.
    pub fn is_transmissive(&self) -> bool {
        self.transmission > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_default() {
        let mat = Material::new();
        assert_eq!(mat.albedo, Color::splat(0.5));
        assert!((mat.ior - 1.5).abs() < 0.001);
        assert!(!mat.is_emissive());
        assert!(!mat.is_transmissive());
        assert!(!mat.subsurface);
    }

    #[test]
    fn test_presets() {
        assert!((Material::metal().metalness - 1.0).abs() < 0.001);
        assert!(Material::glass().is_transmissive());
        assert!(Material::emissive().is_emissive());
        assert!(Material::matte().roughness > Material::glossy().roughness);
    }

    #[test]
    fn test_builders_clamp_unit_parameters() {
        let mat = Material::new()
            .with_roughness(1.5)
            .with_metalness(-0.5)
            .with_transmission(2.0)
            .with_specular(0.25);

        assert_eq!(mat.roughness, 1.0);
        assert_eq!(mat.metalness, 0.0);
        assert_eq!(mat.transmission, 1.0);
        assert_eq!(mat.specular, 0.25);
    }
}
