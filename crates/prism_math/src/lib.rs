// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod aabb;
mod camera;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use camera::Camera;
pub use interval::Interval;
pub use ray::{reflect, Ray};
