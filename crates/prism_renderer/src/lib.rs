//! Prism Renderer - CPU Whitted-style ray tracing
//!
//! Traces primary rays through a [`Scene`](prism_core::Scene), shades hits
//! with Lambert diffuse, GGX specular, Fresnel-weighted refraction and
//! emission, and renders frames in parallel row tiles.
//!
//! ```no_run
//! use prism_core::Scene;
//! use prism_math::Camera;
//! use prism_renderer::{CancelToken, RenderConfig, Scheduler};
//!
//! let config = RenderConfig::default().with_resolution(320, 240);
//! let scheduler = Scheduler::from_config(&config)?;
//! let frame = scheduler.render(&Scene::new(), &Camera::default(), &config, &CancelToken::new())?;
//! assert_eq!(frame.framebuffer.width, 320);
//! # Ok::<(), prism_renderer::RenderError>(())
//! ```

mod cuboid;
mod error;
mod framebuffer;
mod hittable;
mod plane;
mod renderer;
mod scheduler;
pub mod shading;
mod sphere;
mod tile;

pub use error::{RenderError, RenderResult};
pub use framebuffer::{Framebuffer, CHANNELS};
pub use hittable::{intersect_object, intersect_scene, Hit, SceneIntersect, HIT_EPSILON};
pub use renderer::{color_to_rgba, render_pixel, Integrator, RenderConfig};
pub use scheduler::{CancelToken, Frame, FrameStatus, RenderStats, Scheduler, FALLBACK_WORKERS};
pub use shading::Tracer;
pub use tile::{generate_tiles, partition_rows, render_tile, Tile, TileResult};
