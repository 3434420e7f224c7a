//! Sphere primitive.

use sundog_math::{Aabb, InvertedRay, Point3};

use crate::HitRecord;

/// A sphere described by center and radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Test the ray against this sphere, committing distance and `id` into
    /// the record only on improvement over the current closest hit.
    ///
    /// Solves the half-b quadratic assuming a unit ray direction (`a = 1`).
    /// Only the near root is considered, so a ray that starts inside the
    /// sphere exits without seeing the far wall. Point and normal are not
    /// computed here; call [`Sphere::set_normal`] once the global closest
    /// hit is known.
    pub fn intersect(&self, ray: &InvertedRay, rec: &mut HitRecord, id: u32) -> bool {
        let oc = ray.origin - self.center;
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return false;
        }

        let distance = -half_b - discriminant.sqrt();
        if distance < 0.0 {
            return false;
        }
        if rec.is_hit() && distance >= rec.distance {
            return false;
        }

        rec.distance = distance;
        rec.id = id;
        true
    }

    /// Fill in the hit point and face normal for a hit recorded against
    /// this sphere.
    pub fn set_normal(&self, ray: &InvertedRay, rec: &mut HitRecord) {
        rec.p = ray.at(rec.distance);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
    }

    /// Tightest axis-aligned box around the sphere.
    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.center, self.radius)
    }

    /// Center point, used to order primitives along a BVH split axis.
    pub fn center(&self) -> Point3 {
        self.center
    }
}
