//! Axis-aligned bounding boxes for BVH construction and traversal.

use glam::Vec3A;

use crate::{InvertedRay, Point3};

/// Axis-aligned bounding box stored as a min/max corner pair.
///
/// The default box is inverted-infinite (min = +inf, max = -inf): it is
/// empty, and merging anything into it yields that thing unchanged, so a
/// default box is the identity element for folds over bounds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vec3A::INFINITY,
            max: Vec3A::NEG_INFINITY,
        }
    }
}

impl Aabb {
    /// Create a box from explicit corners. Callers must order the corners;
    /// a min above max on any axis makes the box empty.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create the cube of half-extent `radius` around `center`.
    pub fn centered(center: Point3, radius: f32) -> Self {
        let r = Vec3A::splat(radius);
        Self {
            min: center - r,
            max: center + r,
        }
    }

    /// A box is empty when min meets or exceeds max on any axis.
    pub fn is_empty(&self) -> bool {
        self.min.cmpge(self.max).any()
    }

    /// Grow this box so it also encloses `other`.
    ///
    /// Empty boxes are absorbed as no-ops, which keeps the default box an
    /// identity under merging.
    pub fn merge(&mut self, other: &Aabb) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Widen the box by `amount` per axis, split evenly between both
    /// corners. Guards flat boxes against zero-thickness slab tests.
    pub fn expand(&mut self, amount: f32) {
        let half = Vec3A::splat(amount * 0.5);
        self.min -= half;
        self.max += half;
    }

    /// Extent along each axis. Negative for empty boxes.
    pub fn size(&self) -> Vec3A {
        self.max - self.min
    }

    /// Center point of the box.
    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    /// Whether `point` lies inside the box, boundary included.
    pub fn contains(&self, point: Point3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Index (0 = X, 1 = Y, 2 = Z) of the axis with the largest extent.
    pub fn longest_axis(&self) -> usize {
        let size = self.size();
        if size.x > size.y && size.x > size.z {
            0
        } else if size.y > size.z {
            1
        } else {
            2
        }
    }

    /// Slab test against a ray with a precomputed inverse direction.
    ///
    /// Division-free: each axis costs two subtract-multiplies. There is no
    /// near/far clamp, so a box entirely behind the ray origin still
    /// reports true; closest-hit queries stay correct because primitive
    /// tests range-check the actual distance. Clamping against the current
    /// best hit would be a pruning improvement, not a correctness fix.
    pub fn intersects(&self, ray: &InvertedRay) -> bool {
        let t1 = (self.min - ray.origin) * ray.inv_direction;
        let t2 = (self.max - ray.origin) * ray.inv_direction;
        let t_near = t1.min(t2);
        let t_far = t1.max(t2);
        t_near.max_element() <= t_far.min_element()
    }
}
