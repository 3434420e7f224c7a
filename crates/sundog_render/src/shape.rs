//! Closed union of renderable shapes.

use sundog_math::{Aabb, InvertedRay, Point3};

use crate::{HitRecord, Sphere};

/// The shapes a scene can contain, dispatched by exhaustive match.
///
/// Only spheres ship today; the surrounding machinery (BVH, scene, trace)
/// never looks inside this enum, so new variants slot in here and in the
/// match arms below.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
}

impl Shape {
    /// Closest-hit test. See [`Sphere::intersect`] for the accumulator
    /// protocol.
    #[inline]
    pub fn intersect(&self, ray: &InvertedRay, rec: &mut HitRecord, id: u32) -> bool {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray, rec, id),
        }
    }

    /// Fill in point and normal for a hit recorded against this shape.
    #[inline]
    pub fn set_normal(&self, ray: &InvertedRay, rec: &mut HitRecord) {
        match self {
            Shape::Sphere(sphere) => sphere.set_normal(ray, rec),
        }
    }

    /// Bounding box of the shape.
    pub fn bounds(&self) -> Aabb {
        match self {
            Shape::Sphere(sphere) => sphere.bounds(),
        }
    }

    /// Representative point for BVH split ordering.
    pub fn center(&self) -> Point3 {
        match self {
            Shape::Sphere(sphere) => sphere.center(),
        }
    }

    /// Why this shape cannot be rendered, or `None` if it is well formed.
    ///
    /// Checked at scene finalization, before the BVH is built, so that a
    /// malformed shape becomes a construction error instead of NaNs in the
    /// image.
    pub fn degeneracy(&self) -> Option<&'static str> {
        match self {
            Shape::Sphere(sphere) => {
                if !sphere.center.is_finite() {
                    Some("sphere center is not finite")
                } else if !sphere.radius.is_finite() {
                    Some("sphere radius is not finite")
                } else if sphere.radius <= 0.0 {
                    Some("sphere radius must be positive")
                } else {
                    None
                }
            }
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sundog_math::Vec3A;

    #[test]
    fn test_shape_delegates_to_sphere() {
        let shape = Shape::from(Sphere::new(Vec3A::new(0.0, 0.0, -3.0), 1.0));
        let ray = InvertedRay::new(Vec3A::ZERO, -Vec3A::Z);
        let mut rec = HitRecord::default();

        assert!(shape.intersect(&ray, &mut rec, 3));
        assert_eq!(rec.id, 3);
        assert_eq!(shape.center(), Vec3A::new(0.0, 0.0, -3.0));
        assert!(shape.bounds().contains(Vec3A::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn test_degeneracy() {
        let good = Shape::from(Sphere::new(Vec3A::ZERO, 1.0));
        assert!(good.degeneracy().is_none());

        let flat = Shape::from(Sphere::new(Vec3A::ZERO, 0.0));
        assert!(flat.degeneracy().is_some());

        let negative = Shape::from(Sphere::new(Vec3A::ZERO, -1.0));
        assert!(negative.degeneracy().is_some());

        let nan_center = Shape::from(Sphere::new(Vec3A::splat(f32::NAN), 1.0));
        assert!(nan_center.degeneracy().is_some());

        let inf_radius = Shape::from(Sphere::new(Vec3A::ZERO, f32::INFINITY));
        assert!(inf_radius.degeneracy().is_some());
    }
}
