//! Vector helpers layered on top of glam.

use glam::Vec3A;
use rand::Rng;

/// Point in 3D space. Same storage as a direction; the alias marks intent
/// at call sites.
pub type Point3 = Vec3A;

/// True if every component of `v` is smaller than `eps` in magnitude.
///
/// Used to catch degenerate scatter directions before they reach
/// `normalize`.
#[inline]
pub fn near_zero(v: Vec3A, eps: f32) -> bool {
    v.abs().max_element() < eps
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Uniform random vector with each component drawn from `[lo, hi)`.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> Vec3A {
    Vec3A::new(
        rng.gen_range(lo..hi),
        rng.gen_range(lo..hi),
        rng.gen_range(lo..hi),
    )
}

/// Uniform random point strictly inside the unit sphere, by rejection
/// sampling of the enclosing cube.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    loop {
        let p = random_in_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform random direction on the unit sphere.
///
/// A sample landing exactly at the origin would normalize to NaN; with
/// 32-bit floats the acceptance region makes that probability negligible
/// and it is not defended against.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    random_in_unit_sphere(rng).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3A::ZERO, 1e-8));
        assert!(near_zero(Vec3A::splat(1e-9), 1e-8));
        assert!(!near_zero(Vec3A::new(1e-9, 1e-9, 1e-7), 1e-8));
        assert!(!near_zero(Vec3A::X, 1e-8));
    }

    #[test]
    fn test_reflect() {
        // 45 degree bounce off the ground plane
        let v = Vec3A::new(1.0, -1.0, 0.0);
        let n = Vec3A::Y;
        assert_eq!(reflect(v, n), Vec3A::new(1.0, 1.0, 0.0));

        // Head-on reflection reverses the vector
        assert_eq!(reflect(-Vec3A::Y, Vec3A::Y), Vec3A::Y);
    }

    #[test]
    fn test_random_in_range_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let v = random_in_range(&mut rng, -2.0, 3.0);
            for i in 0..3 {
                assert!(v[i] >= -2.0 && v[i] < 3.0);
            }
        }
    }

    #[test]
    fn test_random_in_unit_sphere() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let p = random_in_unit_sphere(&mut rng);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }
}
