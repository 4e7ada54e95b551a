//! Prism Core - Scene description for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Object`, `Geometry`, `Light`
//! - **Materials**: `Material` with presets (`matte`, `glossy`, `metal`, `glass`, `emissive`)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use prism_core::{Geometry, Light, Material, Object, Scene};
//! use prism_math::Vec3;
//!
//! let scene = Scene::new()
//!     .with_object(Object::new(
//!         Geometry::sphere(Vec3::ZERO, 1.0),
//!         Arc::new(Material::metal()),
//!     ))
//!     .with_light(Light::Point { position: Vec3::splat(5.0), color: Vec3::ONE });
//! assert_eq!(scene.object_count(), 1);
//! ```

pub mod material;
pub mod scene;

// Re-export commonly used types
pub use material::{Color, Material};
pub use scene::{Geometry, Light, Object, Scene};
