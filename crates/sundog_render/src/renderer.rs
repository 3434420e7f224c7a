//! Row-parallel renderer driving the trace loop.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::{Color, Framebuffer, Scene};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing. Must be at least 1.
    pub samples_per_pixel: u32,
    /// Maximum scatter events per path
    pub max_bounces: u32,
    /// Seed from which every row derives its private RNG stream
    pub master_seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            samples_per_pixel: 32,
            max_bounces: 50,
            master_seed: 0xdeadbeef,
        }
    }
}

impl RenderConfig {
    /// Width over height, for camera construction.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// What a render cost.
#[derive(Debug, Copy, Clone)]
pub struct RenderStats {
    pub elapsed: Duration,
    /// Camera rays shot: width * height * samples per pixel.
    pub primary_rays: u64,
}

impl RenderStats {
    pub fn mrays_per_sec(&self) -> f64 {
        self.primary_rays as f64 / self.elapsed.as_secs_f64() / 1e6
    }
}

/// Render the scene into a fresh framebuffer.
///
/// Rows are the unit of parallelism. Each row seeds a private generator
/// with `master_seed ^ row` and writes a disjoint pixel slice, so a fixed
/// seed and image size reproduce the image bit for bit at any thread
/// count. Row 0 lands at the top of the image.
///
/// Panics if either image dimension is zero.
pub fn render(scene: &Scene, config: &RenderConfig) -> (Framebuffer, RenderStats) {
    let width = config.width;
    let height = config.height;
    // Misconfiguration, not a numeric edge case: fail with a clear message
    // instead of letting the row chunking panic opaquely
    assert!(
        width > 0 && height > 0,
        "render requires non-zero image dimensions, got {width}x{height}"
    );
    let sample_weight = 1.0 / config.samples_per_pixel as f32;

    // Pixel spacing in normalized image coordinates; sample jitter covers
    // one pixel step. A single-pixel axis has no spacing to jitter over.
    let du = if width > 1 { 1.0 / (width - 1) as f32 } else { 0.0 };
    let dv = if height > 1 { 1.0 / (height - 1) as f32 } else { 0.0 };

    log::info!(
        "rendering {}x{} at {} spp, {} bounces, {} threads",
        width,
        height,
        config.samples_per_pixel,
        config.max_bounces,
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let mut frame = Framebuffer::new(width, height);
    frame
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, pixels)| {
            let mut rng = SmallRng::seed_from_u64(config.master_seed ^ row as u64);
            let v = (height as usize - 1 - row) as f32 * dv;
            for (x, pixel) in pixels.iter_mut().enumerate() {
                let u = x as f32 * du;
                let mut sum = Color::ZERO;
                for _ in 0..config.samples_per_pixel {
                    let off_u = rng.gen::<f32>() * du;
                    let off_v = rng.gen::<f32>() * dv;
                    let ray = scene.camera.shoot_ray(u + off_u, v + off_v);
                    sum += scene.trace(&ray, &mut rng, config.max_bounces);
                }
                *pixel = sum * sample_weight;
            }
        });

    let stats = RenderStats {
        elapsed: start.elapsed(),
        primary_rays: width as u64 * height as u64 * config.samples_per_pixel as u64,
    };
    log::info!(
        "rendered in {:.2}s ({:.2} Mrays/s)",
        stats.elapsed.as_secs_f64(),
        stats.mrays_per_sec()
    );
    (frame, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Material, Sphere};
    use glam::Vec2;
    use sundog_math::Vec3A;

    fn test_config() -> RenderConfig {
        RenderConfig {
            width: 16,
            height: 8,
            samples_per_pixel: 4,
            max_bounces: 4,
            master_seed: 0xdeadbeef,
        }
    }

    fn test_scene() -> Scene {
        let camera = Camera::axis_aligned(Vec3A::new(0.0, 0.0, 3.0), Vec2::new(4.0, 2.0), 1.0);
        let mut scene = Scene::new(camera);
        scene.add(
            Sphere::new(Vec3A::ZERO, 1.0),
            Material::Lambertian {
                albedo: Color::splat(0.5),
            },
        );
        scene.add(
            Sphere::new(Vec3A::new(0.0, -101.0, 0.0), 100.0),
            Material::Metal {
                albedo: Color::new(0.7, 0.6, 0.5),
                fuzz: 0.1,
            },
        );
        scene.finish().unwrap();
        scene
    }

    #[test]
    fn test_aspect_ratio() {
        let config = test_config();
        assert_eq!(config.aspect_ratio(), 2.0);
    }

    #[test]
    #[should_panic(expected = "non-zero image dimensions")]
    fn test_zero_width_rejected() {
        let scene = test_scene();
        let config = RenderConfig {
            width: 0,
            ..test_config()
        };
        render(&scene, &config);
    }

    #[test]
    #[should_panic(expected = "non-zero image dimensions")]
    fn test_zero_height_rejected() {
        let scene = test_scene();
        let config = RenderConfig {
            height: 0,
            ..test_config()
        };
        render(&scene, &config);
    }

    #[test]
    fn test_stats_count_primary_rays() {
        let scene = test_scene();
        let config = test_config();
        let (frame, stats) = render(&scene, &config);

        assert_eq!(frame.pixels.len(), 16 * 8);
        assert_eq!(stats.primary_rays, 16 * 8 * 4);
    }

    #[test]
    fn test_render_is_deterministic() {
        let scene = test_scene();
        let config = test_config();

        let (a, _) = render(&scene, &config);
        let (b, _) = render(&scene, &config);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_render_is_thread_count_invariant() {
        let scene = test_scene();
        let config = test_config();

        let serial = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| render(&scene, &config))
            .0;
        let parallel = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| render(&scene, &config))
            .0;

        assert_eq!(serial.pixels, parallel.pixels);
    }

    #[test]
    fn test_seed_changes_image() {
        let scene = test_scene();
        let config = test_config();
        let reseeded = RenderConfig {
            master_seed: 1,
            ..config.clone()
        };

        let (a, _) = render(&scene, &config);
        let (b, _) = render(&scene, &reseeded);
        assert_ne!(a.pixels, b.pixels);
    }

    #[test]
    fn test_empty_scene_renders_sky_gradient() {
        let camera = Camera::axis_aligned(Vec3A::ZERO, Vec2::new(4.0, 2.0), 1.0);
        let mut scene = Scene::new(camera);
        scene.finish().unwrap();

        let config = test_config();
        let (frame, _) = render(&scene, &config);

        for pixel in &frame.pixels {
            assert!(pixel.is_finite());
            assert!(pixel.x >= 0.0 && pixel.y >= 0.0 && pixel.z >= 0.0);
        }
        // Row 0 is the top: upward rays are whiter, downward rays bluer,
        // which shows up in the red channel
        let top = frame.get(8, 0);
        let bottom = frame.get(8, 7);
        assert!(top.x > bottom.x);
    }
}
