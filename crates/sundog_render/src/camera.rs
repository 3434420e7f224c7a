//! Pinhole camera.

use glam::Vec2;
use sundog_math::{Point3, Ray, Vec3A};

/// Where the camera sits and what it looks at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraOrientation {
    pub look_from: Point3,
    pub look_at: Point3,
    pub up: Vec3A,
}

/// Pinhole camera mapping normalized image-plane coordinates to rays.
///
/// The viewport corner and spanning vectors are precomputed at
/// construction; shooting a ray is two multiply-adds.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    origin: Point3,
    horizontal: Vec3A,
    vertical: Vec3A,
    corner: Point3,
}

impl Camera {
    /// Build a camera from an orientation, a vertical field of view in
    /// degrees, and the image aspect ratio (width over height).
    pub fn look_at(orientation: CameraOrientation, vfov_degrees: f32, aspect_ratio: f32) -> Self {
        let h = (vfov_degrees.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        let w = (orientation.look_from - orientation.look_at).normalize();
        let u = orientation.up.cross(w).normalize();
        let v = w.cross(u);

        let origin = orientation.look_from;
        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let corner = origin - 0.5 * horizontal - 0.5 * vertical - w;

        Self {
            origin,
            horizontal,
            vertical,
            corner,
        }
    }

    /// Axis-aligned camera looking down -Z through a viewport of the given
    /// width and height at `focal_length`. Handy where ray directions need
    /// to be predictable.
    pub fn axis_aligned(origin: Point3, viewport: Vec2, focal_length: f32) -> Self {
        let horizontal = Vec3A::new(viewport.x, 0.0, 0.0);
        let vertical = Vec3A::new(0.0, viewport.y, 0.0);
        let corner =
            origin - 0.5 * horizontal - 0.5 * vertical - Vec3A::new(0.0, 0.0, focal_length);

        Self {
            origin,
            horizontal,
            vertical,
            corner,
        }
    }

    /// Ray through normalized image coordinates, `s` across and `t` up,
    /// both in [0, 1]. (0, 0) is the lower-left corner of the viewport.
    pub fn shoot_ray(&self, s: f32, t: f32) -> Ray {
        Ray::new(
            self.origin,
            self.corner + s * self.horizontal + t * self.vertical - self.origin,
        )
    }
}
