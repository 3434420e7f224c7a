//! Math foundation for the sundog path tracer.
//!
//! Everything is built on `glam`'s SIMD types: `Vec3A` is the one vector
//! type used for points, directions, and colors alike. This crate adds the
//! pieces glam does not carry: sphere sampling, rays with cached inverse
//! directions, and bounding boxes with an identity-absorbing merge.

// Re-export glam for convenience
pub use glam::*;

mod vec;
pub use vec::{near_zero, random_in_range, random_in_unit_sphere, random_unit_vector, reflect, Point3};

mod ray;
pub use ray::{InvertedRay, Ray};

mod aabb;
pub use aabb::Aabb;
