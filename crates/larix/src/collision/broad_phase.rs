use crate::scene::store::ShapeStore;

use super::pair::{ShapePair, ShapePairManager};

/// Decides whether a candidate pair should be kept, usually a narrow phase test.
pub trait Collider {
    fn is_colliding(&self, pair: &ShapePair, shapes: &ShapeStore) -> bool;
}

impl<F> Collider for F
where
    F: Fn(&ShapePair, &ShapeStore) -> bool,
{
    fn is_colliding(&self, pair: &ShapePair, shapes: &ShapeStore) -> bool {
        self(pair, shapes)
    }
}

/// Produces the pairs that survive one filtering pass.
pub trait BroadPhase {
    fn execute(&self, shapes: &ShapeStore, pair_manager: &ShapePairManager) -> Vec<ShapePair>;
}

/// Runs the collider over every managed pair, no spatial structure.
#[derive(Clone, Debug, Default)]
pub struct SimpleBroadPhase<C> {
    collider: C,
}

impl<C> SimpleBroadPhase<C>
where
    C: Collider,
{
    pub fn new(collider: C) -> Self {
        Self { collider }
    }

    pub fn collider(&self) -> &C {
        &self.collider
    }
}

impl<C> BroadPhase for SimpleBroadPhase<C>
where
    C: Collider,
{
    fn execute(&self, shapes: &ShapeStore, pair_manager: &ShapePairManager) -> Vec<ShapePair> {
        pair_manager
            .pairs()
            .filter(|pair| self.collider.is_colliding(pair, shapes))
            .copied()
            .collect()
    }
}

/// Keeps pairs whose world bounding boxes overlap.
///
/// Unbounded shapes, planes and anything built on them, always pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct AabbCollider;

impl Collider for AabbCollider {
    fn is_colliding(&self, pair: &ShapePair, shapes: &ShapeStore) -> bool {
        let (Some(a), Some(b)) = (shapes.get(pair.first()), shapes.get(pair.second())) else {
            return false;
        };
        match (a.world_aabb(), b.world_aabb()) {
            (Some(a), Some(b)) => a.overlaps(&b),
            _ => true,
        }
    }
}
