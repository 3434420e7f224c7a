//! Built-in scenes.

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sundog_math::Vec3A;
use sundog_render::{Camera, CameraOrientation, Color, Material, Scene, Sphere};

/// Layout seed for the cover scene's sphere field. Fixed so the layout
/// stays the same run to run, independent of the render seed.
const COVER_LAYOUT_SEED: u64 = 0;

/// Scene presets selectable from the command line.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum ScenePreset {
    /// Field of random small spheres around three hero spheres
    Cover,
    /// Just the three hero spheres, for quick renders
    Trio,
}

impl ScenePreset {
    /// Build the preset for an image with the given aspect ratio.
    ///
    /// The returned scene has not been finished yet; the caller runs
    /// [`Scene::finish`] before rendering.
    pub fn build(self, aspect_ratio: f32) -> Scene {
        match self {
            ScenePreset::Cover => cover(aspect_ratio),
            ScenePreset::Trio => trio(aspect_ratio),
        }
    }
}

fn hero_camera(aspect_ratio: f32) -> Camera {
    Camera::look_at(
        CameraOrientation {
            look_from: Vec3A::new(13.0, 2.0, 3.0),
            look_at: Vec3A::ZERO,
            up: Vec3A::Y,
        },
        20.0,
        aspect_ratio,
    )
}

fn add_ground(scene: &mut Scene) {
    scene.add(
        Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0),
        Material::Lambertian {
            albedo: Color::splat(0.5),
        },
    );
}

fn add_heroes(scene: &mut Scene) {
    scene.add(
        Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0),
        Material::Dielectric {
            refraction_index: 1.5,
        },
    );
    scene.add(
        Sphere::new(Vec3A::new(-4.0, 1.0, 0.0), 1.0),
        Material::Lambertian {
            albedo: Color::new(0.4, 0.2, 0.1),
        },
    );
    scene.add(
        Sphere::new(Vec3A::new(4.0, 1.0, 0.0), 1.0),
        Material::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    );
}

fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::new(rng.gen(), rng.gen(), rng.gen())
}

/// The cover scene: a 22x22 field of small random spheres on a gray
/// ground, with the three hero spheres in the middle.
fn cover(aspect_ratio: f32) -> Scene {
    let mut scene = Scene::new(hero_camera(aspect_ratio));
    let mut rng = StdRng::seed_from_u64(COVER_LAYOUT_SEED);

    add_ground(&mut scene);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3A::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep the field clear of the metal hero sphere
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let base = random_color(&mut rng);
                Material::Lambertian {
                    albedo: base * base,
                }
            } else if choose_mat < 0.95 {
                Material::Metal {
                    albedo: 0.5 * (random_color(&mut rng) + Color::ONE),
                    fuzz: 0.5 * rng.gen::<f32>(),
                }
            } else {
                Material::Dielectric {
                    refraction_index: 1.5,
                }
            };
            scene.add(Sphere::new(center, 0.2), material);
        }
    }

    add_heroes(&mut scene);
    scene
}

/// The hero spheres and the ground alone.
fn trio(aspect_ratio: f32) -> Scene {
    let mut scene = Scene::new(hero_camera(aspect_ratio));
    add_ground(&mut scene);
    add_heroes(&mut scene);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sundog_render::Ray;

    #[test]
    fn test_trio_builds() {
        let mut scene = ScenePreset::Trio.build(1.6);
        assert_eq!(scene.len(), 4);
        scene.finish().unwrap();
    }

    #[test]
    fn test_cover_builds() {
        let mut scene = ScenePreset::Cover.build(1.6);

        // Ground + heroes + most of the 22x22 grid; only cells that land on
        // the metal hero are skipped
        assert!(scene.len() > 450);
        assert!(scene.len() <= 488);
        scene.finish().unwrap();
    }

    #[test]
    fn test_cover_layout_is_reproducible() {
        let mut first = ScenePreset::Cover.build(1.6);
        let mut second = ScenePreset::Cover.build(1.6);
        assert_eq!(first.len(), second.len());

        first.finish().unwrap();
        second.finish().unwrap();

        // Same layout and same trace seed produce the same radiance
        let ray = Ray::new(Vec3A::new(13.0, 2.0, 3.0), -Vec3A::new(13.0, 2.0, 3.0));
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        assert_eq!(
            first.trace(&ray, &mut rng_a, 8),
            second.trace(&ray, &mut rng_b, 8)
        );
    }
}
