//! Rays, in both their plain and traversal forms.

use glam::Vec3A;

use crate::Point3;

/// A ray in 3D space with origin and direction.
///
/// The direction is whatever the producer supplied; nothing here requires
/// it to be unit length. Cameras and scatter events create these.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Point3, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}

/// A ray prepared for traversal: unit direction plus its cached
/// component-wise reciprocal.
///
/// The reciprocal turns every slab test into subtract-and-multiply, and
/// the unit direction lets the sphere quadratic assume `a = 1`. Both
/// derived fields are computed once in the constructor; axis-parallel
/// directions produce infinite reciprocal components, which IEEE
/// arithmetic carries through the slab test correctly.
#[derive(Debug, Copy, Clone)]
pub struct InvertedRay {
    pub origin: Point3,
    pub direction: Vec3A,
    pub inv_direction: Vec3A,
}

impl InvertedRay {
    /// Create a traversal ray. The direction is normalized here, once.
    ///
    /// A zero-length direction normalizes to NaN components and will miss
    /// everything; callers own that hazard.
    pub fn new(origin: Point3, direction: Vec3A) -> Self {
        let direction = direction.normalize();
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
        }
    }

    /// Get the point along the ray at parameter t.
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}

impl From<&Ray> for InvertedRay {
    fn from(ray: &Ray) -> Self {
        Self::new(ray.origin, ray.direction)
    }
}
