//! Whitted-style ray tracer
//!
//! Casts rays from an eye through a viewport and computes each pixel by
//! recursive light transport: Phong shading, hard shadows, mirror reflection,
//! plain transparency and Snell refraction. Objects are scanned linearly.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod hittable;
pub mod interval;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod output;
pub mod plane;
pub mod ray;
pub mod scene;
pub mod shading;
pub mod sphere;
pub mod tracer;

pub use hittable::{Hittable, Intersection};
pub use material::{Color, Material};
pub use scene::{Light, Object, Scene, Shape};
pub use tracer::{Traced, Tracer};
