//! Sundog render core: CPU Monte Carlo path tracing.
//!
//! Geometry goes into a median-split BVH, materials are a closed union
//! scattered per bounce, and the renderer parallelizes over image rows
//! with an independent RNG stream per row.

mod hit;
mod sphere;
mod shape;
mod material;
mod bvh;
mod scene;
mod camera;
mod framebuf;
mod renderer;

pub use hit::HitRecord;
pub use sphere::Sphere;
pub use shape::Shape;
pub use material::{Color, Material, Scatter};
pub use bvh::{BuildError, Bvh, BvhStats, Primitive};
pub use scene::{Object, Scene, SceneError};
pub use camera::{Camera, CameraOrientation};
pub use framebuf::{linear_to_gamma, Framebuffer, SaveError};
pub use renderer::{render, RenderConfig, RenderStats};

/// Re-export the math types that appear in this crate's public API
pub use sundog_math::{Aabb, InvertedRay, Point3, Ray, Vec3A};
