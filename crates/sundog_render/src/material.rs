//! Surface materials and scattering.

use rand::Rng;
use sundog_math::{near_zero, random_in_unit_sphere, random_unit_vector, reflect, InvertedRay, Vec3A};

use crate::HitRecord;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3A;

/// Components smaller than this make a scatter direction degenerate.
const SCATTER_EPSILON: f32 = 1e-8;

/// Result of scattering a ray at a surface.
#[derive(Debug, Copy, Clone)]
pub struct Scatter {
    /// Direction of the bounced ray. Not necessarily unit length.
    pub direction: Vec3A,
    /// Per-channel reflectance applied to whatever the bounce returns.
    pub attenuation: Color,
}

/// The materials a surface can have.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Material {
    /// Diffuse surface scattering around the normal.
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` of 0 is a perfect mirror.
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive surface such as glass or water.
    Dielectric { refraction_index: f32 },
}

impl Material {
    /// Scatter the incoming ray at a hit point.
    ///
    /// Always produces a bounce; none of these materials absorb rays
    /// outright. `ray` must be the traversal ray that produced `rec`, so
    /// its direction is unit length.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        ray: &InvertedRay,
        rec: &HitRecord,
        rng: &mut R,
    ) -> Scatter {
        match *self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_unit_vector(rng);
                if near_zero(direction, SCATTER_EPSILON) {
                    // The sample cancelled the normal almost exactly
                    log::trace!("degenerate lambertian scatter at {:?}, using normal", rec.p);
                    direction = rec.normal;
                }
                Scatter {
                    direction,
                    attenuation: albedo,
                }
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray.direction, rec.normal);
                // No re-check that the fuzzed direction stays above the
                // surface; grazing angles can leak energy below it
                Scatter {
                    direction: reflected + fuzz * random_in_unit_sphere(rng),
                    attenuation: albedo,
                }
            }
            Material::Dielectric { refraction_index } => {
                let refraction_ratio = if rec.front_face {
                    1.0 / refraction_index
                } else {
                    refraction_index
                };

                let cos_theta = (-ray.direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let total_internal = refraction_ratio * sin_theta > 1.0;
                let direction =
                    if total_internal || reflectance(cos_theta, refraction_ratio) > rng.gen::<f32>() {
                        reflect(ray.direction, rec.normal)
                    } else {
                        refract(ray.direction, rec.normal, refraction_ratio)
                    };

                Scatter {
                    direction,
                    attenuation: Color::ONE,
                }
            }
        }
    }
}

/// Schlick's approximation for reflectance at a dielectric boundary.
fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Refract a unit vector through a surface via the perpendicular/parallel
/// decomposition.
fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn front_hit(normal: Vec3A) -> HitRecord {
        HitRecord {
            distance: 1.0,
            p: Vec3A::ZERO,
            normal,
            front_face: true,
            id: 0,
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::Metal {
            albedo: Color::new(0.8, 0.8, 0.8),
            fuzz: 0.0,
        };
        let ray = InvertedRay::new(Vec3A::new(0.0, 1.0, -1.0), Vec3A::new(0.0, -1.0, 1.0));
        let rec = front_hit(Vec3A::Y);
        let mut rng = StdRng::seed_from_u64(42);

        let scatter = material.scatter(&ray, &rec, &mut rng);

        // 45 degrees in, 45 degrees out, exactly
        let expected = reflect(ray.direction, Vec3A::Y);
        assert_eq!(scatter.direction, expected);
        assert!(scatter.direction.y > 0.0);
        assert_eq!(scatter.attenuation, Color::new(0.8, 0.8, 0.8));
    }

    #[test]
    fn test_lambertian_scatter() {
        let material = Material::Lambertian {
            albedo: Color::new(0.5, 0.2, 0.1),
        };
        let ray = InvertedRay::new(Vec3A::ZERO, -Vec3A::Y);
        let rec = front_hit(Vec3A::Y);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let scatter = material.scatter(&ray, &rec, &mut rng);
            assert_eq!(scatter.attenuation, Color::new(0.5, 0.2, 0.1));

            // Direction is normal plus a unit vector: its offset from the
            // normal has unit length, and it can never point below the
            // surface by more than that unit offset allows
            let offset = scatter.direction - rec.normal;
            assert!((offset.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_dielectric_straight_through_at_unity_ratio() {
        // refraction_index 1.0 means no optical boundary. Head-on, the
        // Schlick term vanishes exactly, so every draw refracts and the
        // direction passes through unchanged
        let material = Material::Dielectric {
            refraction_index: 1.0,
        };
        let ray = InvertedRay::new(Vec3A::ZERO, -Vec3A::Y);
        let rec = front_hit(Vec3A::Y);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let scatter = material.scatter(&ray, &rec, &mut rng);
            assert!((scatter.direction - ray.direction).length() < 1e-5);
            assert_eq!(scatter.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a grazing angle: ratio * sin_theta > 1 forces a
        // reflection regardless of the RNG draw
        let material = Material::Dielectric {
            refraction_index: 1.5,
        };
        let direction = Vec3A::new(0.9, -0.1, 0.0).normalize();
        let ray = InvertedRay::new(Vec3A::ZERO, direction);
        let rec = HitRecord {
            front_face: false,
            ..front_hit(Vec3A::Y)
        };
        let mut rng = StdRng::seed_from_u64(42);

        let scatter = material.scatter(&ray, &rec, &mut rng);
        let expected = reflect(ray.direction, Vec3A::Y);
        assert!((scatter.direction - expected).length() < 1e-5);
    }

    #[test]
    fn test_reflectance_schlick() {
        // Head-on against glass: r0 = ((1-1.5)/(1+1.5))^2 = 0.04
        assert!((reflectance(1.0, 1.5) - 0.04).abs() < 1e-5);

        // Grazing incidence reflects everything
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_refract_bends_toward_surface() {
        // Air into glass at 45 degrees: the transmitted ray bends toward
        // the normal, so its vertical component grows in magnitude
        let incoming = Vec3A::new(1.0, -1.0, 0.0).normalize();
        let out = refract(incoming, Vec3A::Y, 1.0 / 1.5);

        assert!((out.length() - 1.0).abs() < 1e-4);
        assert!(out.y < incoming.y);
    }
}
