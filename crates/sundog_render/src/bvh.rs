//! Bounding volume hierarchy for closest-hit acceleration.
//!
//! Median-split construction: each node takes the longest axis of its
//! merged bounds, sorts its items by center along that axis, and hands one
//! half to each child. Traversal prunes on the slab test and otherwise
//! visits both children, relying on the hit record's closest-wins rule
//! instead of any child ordering.

use std::cmp::Ordering;

use sundog_math::{Aabb, InvertedRay, Point3};
use thiserror::Error;

use crate::HitRecord;

/// Maximum items per leaf before a node splits.
const MAX_LEAF_ITEMS: usize = 3;

/// Padding added to every node's bounds, guarding zero-extent axes.
const BOUNDS_MARGIN: f32 = 1e-3;

/// What the hierarchy needs from the things it holds.
pub trait Primitive {
    /// Bounding box of the item.
    fn bounds(&self) -> Aabb;
    /// Representative point used to order items along a split axis.
    fn center(&self) -> Point3;
    /// Closest-hit test against the shared accumulator. Returns true only
    /// when the record was improved.
    fn intersect(&self, ray: &InvertedRay, rec: &mut HitRecord) -> bool;
}

/// Errors from hierarchy construction.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot build a BVH over zero items")]
    NoItems,
    #[error("median split on axis {axis} produced an empty half ({count} items)")]
    EmptySplit { axis: usize, count: usize },
}

enum BvhNode<T> {
    /// A handful of items tested directly.
    Leaf(Vec<T>),
    /// Exactly two subvolumes, never a mix of items and children.
    Split(Box<Bvh<T>>, Box<Bvh<T>>),
}

/// Median-split bounding volume hierarchy.
///
/// Built once over an item list and immutable afterwards; there is no
/// incremental insert or delete.
pub struct Bvh<T> {
    bounds: Aabb,
    node: BvhNode<T>,
}

impl<T: Primitive> Bvh<T> {
    /// Build a hierarchy over `items`.
    pub fn build(mut items: Vec<T>) -> Result<Self, BuildError> {
        if items.is_empty() {
            return Err(BuildError::NoItems);
        }

        let mut bounds = Aabb::default();
        for item in &items {
            bounds.merge(&item.bounds());
        }
        bounds.expand(BOUNDS_MARGIN);

        if items.len() <= MAX_LEAF_ITEMS {
            return Ok(Self {
                bounds,
                node: BvhNode::Leaf(items),
            });
        }

        let axis = bounds.longest_axis();
        items.sort_by(|a, b| {
            a.center()[axis]
                .partial_cmp(&b.center()[axis])
                .unwrap_or(Ordering::Equal)
        });

        let right_items = items.split_off(items.len() / 2);
        let left_items = items;

        // A median split of four or more items always fills both halves;
        // an empty half means the split rule itself is broken
        if left_items.is_empty() || right_items.is_empty() {
            let count = left_items.len() + right_items.len();
            log::error!("BVH median split on axis {axis} produced an empty half ({count} items)");
            return Err(BuildError::EmptySplit { axis, count });
        }

        let left = Self::build(left_items)?;
        let right = Self::build(right_items)?;

        Ok(Self {
            bounds,
            node: BvhNode::Split(Box::new(left), Box::new(right)),
        })
    }

    /// Closest-hit query into the shared accumulator. Returns true if any
    /// item under this node improved the record.
    pub fn intersect(&self, ray: &InvertedRay, rec: &mut HitRecord) -> bool {
        if !self.bounds.intersects(ray) {
            return false;
        }

        match &self.node {
            BvhNode::Leaf(items) => {
                let mut any_hit = false;
                for item in items {
                    any_hit |= item.intersect(ray, rec);
                }
                any_hit
            }
            BvhNode::Split(left, right) => {
                let hit_left = left.intersect(ray, rec);
                let hit_right = right.intersect(ray, rec);
                hit_left || hit_right
            }
        }
    }

    /// Padded bounds of everything under this node.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Walk the tree and tally its shape, for construction-time logging.
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats::default();
        self.collect_stats(1, &mut stats);
        stats
    }

    fn collect_stats(&self, depth: usize, stats: &mut BvhStats) {
        stats.nodes += 1;
        stats.max_depth = stats.max_depth.max(depth);
        match &self.node {
            BvhNode::Leaf(items) => {
                stats.leaves += 1;
                stats.items += items.len();
            }
            BvhNode::Split(left, right) => {
                left.collect_stats(depth + 1, stats);
                right.collect_stats(depth + 1, stats);
            }
        }
    }
}

/// Shape of a built hierarchy.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BvhStats {
    pub nodes: usize,
    pub leaves: usize,
    pub items: usize,
    pub max_depth: usize,
}
