//! Scene assembly and the recursive trace loop.

use rand::Rng;
use sundog_math::{Aabb, InvertedRay, Point3, Ray};
use thiserror::Error;

use crate::{BuildError, Bvh, Camera, Color, HitRecord, Material, Primitive, Shape};

/// A shape paired with its material.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Object {
    pub shape: Shape,
    pub material: Material,
}

/// Shape plus its index into the object list; what the BVH holds. The id
/// recovers the object's material after traversal.
struct Item {
    shape: Shape,
    id: u32,
}

impl Primitive for Item {
    fn bounds(&self) -> Aabb {
        self.shape.bounds()
    }

    fn center(&self) -> Point3 {
        self.shape.center()
    }

    fn intersect(&self, ray: &InvertedRay, rec: &mut HitRecord) -> bool {
        self.shape.intersect(ray, rec, self.id)
    }
}

/// Errors from scene finalization.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("object {id} is degenerate: {reason}")]
    DegenerateShape { id: u32, reason: &'static str },
    #[error("BVH construction failed")]
    Build(#[from] BuildError),
}

/// A renderable scene: objects, the acceleration structure over them, and
/// the camera that looks at them.
///
/// Build one with [`Scene::add`] calls followed by [`Scene::finish`]; from
/// then on the scene is read-only and can be traced from any number of
/// threads.
pub struct Scene {
    objects: Vec<Object>,
    bvh: Option<Bvh<Item>>,
    pub camera: Camera,
}

impl Scene {
    /// Create an empty scene seen through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            bvh: None,
            camera,
        }
    }

    /// Append an object and return its id.
    ///
    /// Adding drops any built acceleration structure; call
    /// [`Scene::finish`] again before rendering.
    pub fn add(&mut self, shape: impl Into<Shape>, material: Material) -> u32 {
        self.bvh = None;
        let id = self.objects.len() as u32;
        self.objects.push(Object {
            shape: shape.into(),
            material,
        });
        id
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Validate geometry and build the acceleration structure.
    ///
    /// Degenerate shapes are construction errors naming the offending
    /// object; they never become NaNs in the image. An empty scene
    /// finishes successfully and renders as pure sky. Tracing without
    /// calling this first is defined behavior, just slow: intersection
    /// falls back to a linear scan over the object list.
    pub fn finish(&mut self) -> Result<(), SceneError> {
        for (i, object) in self.objects.iter().enumerate() {
            if let Some(reason) = object.shape.degeneracy() {
                log::error!("rejecting scene: object {i} is degenerate ({reason})");
                return Err(SceneError::DegenerateShape {
                    id: i as u32,
                    reason,
                });
            }
        }

        if self.objects.is_empty() {
            log::info!("scene finished with no objects");
            self.bvh = None;
            return Ok(());
        }

        let items = self
            .objects
            .iter()
            .enumerate()
            .map(|(i, object)| Item {
                shape: object.shape,
                id: i as u32,
            })
            .collect();
        let bvh = Bvh::build(items)?;

        let stats = bvh.stats();
        log::info!(
            "scene finished: {} objects, {} BVH nodes ({} leaves), depth {}",
            self.objects.len(),
            stats.nodes,
            stats.leaves,
            stats.max_depth
        );
        self.bvh = Some(bvh);
        Ok(())
    }

    /// Closest hit across every object, through the BVH when one is built.
    ///
    /// Traversal only accumulates distance and id; the winner's point,
    /// normal, and face orientation are filled in once, afterwards.
    pub fn intersect(&self, ray: &InvertedRay, rec: &mut HitRecord) -> bool {
        let improved = match &self.bvh {
            Some(bvh) => bvh.intersect(ray, rec),
            None => {
                let mut any_hit = false;
                for (i, object) in self.objects.iter().enumerate() {
                    any_hit |= object.shape.intersect(ray, rec, i as u32);
                }
                any_hit
            }
        };

        if rec.is_hit() {
            self.objects[rec.id as usize].shape.set_normal(ray, rec);
        }
        improved
    }

    /// Radiance arriving along `ray`, estimated with at most
    /// `bounces_left` scatter events.
    ///
    /// A miss returns the sky gradient, even at a zero budget. A hit with
    /// no budget left contributes nothing; energy past the bounce budget
    /// is discarded. Otherwise the hit material scatters and the
    /// recursion's result is scaled by its attenuation on the way back up.
    pub fn trace<R: Rng + ?Sized>(&self, ray: &Ray, rng: &mut R, bounces_left: u32) -> Color {
        self.trace_inner(&InvertedRay::from(ray), rng, bounces_left)
    }

    fn trace_inner<R: Rng + ?Sized>(
        &self,
        ray: &InvertedRay,
        rng: &mut R,
        bounces_left: u32,
    ) -> Color {
        let mut rec = HitRecord::default();
        if !self.intersect(ray, &mut rec) {
            return sky_color(ray);
        }
        if bounces_left == 0 {
            return Color::ZERO;
        }

        let material = self.objects[rec.id as usize].material;
        let scatter = material.scatter(ray, &rec, rng);
        let bounced = InvertedRay::new(rec.p, scatter.direction);
        scatter.attenuation * self.trace_inner(&bounced, rng, bounces_left - 1)
    }
}

/// Sky gradient for rays that escape the scene: blue at the nadir
/// blending to white at the zenith.
fn sky_color(ray: &InvertedRay) -> Color {
    let t = 0.5 * ray.direction.y + 0.5;
    let blue = Color::new(0.5, 0.7, 1.0);
    blue.lerp(Color::ONE, t)
}
