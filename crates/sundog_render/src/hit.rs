//! Hit record accumulator for closest-hit queries.

use sundog_math::{InvertedRay, Point3, Vec3A};

/// Record of the closest intersection found so far along one ray.
///
/// Primitives compare their candidate distance against `distance` and only
/// commit on improvement, so a single record can be threaded through an
/// entire traversal and comes out holding the global winner. A fresh
/// record carries the sentinel distance `-1.0`; once a hit lands, the
/// distance only ever decreases.
#[derive(Debug, Copy, Clone)]
pub struct HitRecord {
    /// Ray parameter of the hit. Negative means no hit recorded yet.
    pub distance: f32,
    /// Point of intersection.
    pub p: Point3,
    /// Surface normal at the hit point, facing against the ray.
    pub normal: Vec3A,
    /// Whether the ray struck the front (outside) face.
    pub front_face: bool,
    /// Identifier of the object that produced the hit.
    pub id: u32,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            distance: -1.0,
            p: Point3::ZERO,
            normal: Vec3A::ZERO,
            front_face: false,
            id: 0,
        }
    }
}

impl HitRecord {
    /// Whether any hit has been recorded.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance >= 0.0
    }

    /// Store the normal for this hit, flipped to face against the ray.
    pub fn set_face_normal(&mut self, ray: &InvertedRay, outward_normal: Vec3A) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_hit() {
        let rec = HitRecord::default();
        assert!(!rec.is_hit());
        assert_eq!(rec.distance, -1.0);
    }

    #[test]
    fn test_zero_distance_is_hit() {
        let rec = HitRecord {
            distance: 0.0,
            ..HitRecord::default()
        };
        assert!(rec.is_hit());
    }

    #[test]
    fn test_set_face_normal_front() {
        let ray = InvertedRay::new(Vec3A::ZERO, Vec3A::Z);
        let mut rec = HitRecord::default();

        // Outward normal faces the ray: front face, kept as-is
        rec.set_face_normal(&ray, -Vec3A::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, -Vec3A::Z);
    }

    #[test]
    fn test_set_face_normal_back() {
        let ray = InvertedRay::new(Vec3A::ZERO, Vec3A::Z);
        let mut rec = HitRecord::default();

        // Outward normal along the ray: back face, flipped
        rec.set_face_normal(&ray, Vec3A::Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3A::Z);
    }
}
