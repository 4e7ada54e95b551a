//! Scene description types.
//!
//! A scene is a flat list of objects and lights plus a background color.
//! Everything here is immutable during a render; workers receive their own
//! clone, which is cheap because materials are reference counted.

use std::sync::Arc;

use prism_math::{Quat, Vec3};

use crate::material::{Color, Material};

/// Primitive shape of an object, in object-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Sphere { center: Vec3, radius: f32 },

    /// Infinite plane through `point` with the given up-direction.
    Plane { point: Vec3, normal: Vec3 },

    /// Axis-aligned box.
    Box { center: Vec3, half_extents: Vec3 },
}

impl Geometry {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Geometry::Sphere { center, radius }
    }

    pub fn plane(point: Vec3, normal: Vec3) -> Self {
        Geometry::Plane { point, normal }
    }

    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        Geometry::Box {
            center,
            half_extents,
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Sphere { .. } => "sphere",
            Geometry::Plane { .. } => "plane",
            Geometry::Box { .. } => "box",
        }
    }
}

/// A renderable object: geometry, material and placement.
///
/// `position` offsets the geometry into world space. `orientation` is part
/// of the placement handed over by front ends; planes use their configured
/// normal and boxes stay axis-aligned regardless of it.
#[derive(Clone, Debug)]
pub struct Object {
    pub geometry: Geometry,
    pub material: Arc<Material>,
    pub position: Vec3,
    pub orientation: Quat,
}

impl Object {
    /// Create an object at the origin.
    pub fn new(geometry: Geometry, material: Arc<Material>) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    /// Builder method to set the world position offset.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder method to set the orientation.
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }
}

/// A light source. Intensity is implicitly 1; scale the color instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Uniform, unshadowed light.
    Ambient { color: Color },

    /// Light radiating from a point.
    Point { position: Vec3, color: Color },

    /// Light arriving from the direction of `position`, as seen from the
    /// origin, with no distance falloff.
    Directional { position: Vec3, color: Color },
}

impl Light {
    pub fn color(&self) -> Color {
        match *self {
            Light::Ambient { color }
            | Light::Point { color, .. }
            | Light::Directional { color, .. } => color,
        }
    }
}

/// A complete scene ready for rendering.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Objects, tested in order
    pub objects: Vec<Object>,

    /// Lights, contributions summed
    pub lights: Vec<Light>,

    /// Color returned for rays that hit nothing
    pub background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            background: Color::splat(0.1),
        }
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Builder method to add an object.
    pub fn with_object(mut self, object: Object) -> Self {
        self.add_object(object);
        self
    }

    /// Builder method to add a light.
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    /// Builder method to set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Get object count.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
