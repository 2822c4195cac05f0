pub mod context;
pub mod store;

use log::debug;

use crate::{
    collision::{
        broad_phase::BroadPhase,
        minkowski::{Minkowski, MinkowskiError, MinkowskiPoint},
        pair::{ShapePair, ShapePairManager},
    },
    math::{point::Point, vector::Vector, FloatNum},
    meta::Meta,
    shape::{Shape, ShapeError, ShapeGeometry},
};

use self::{
    context::Context,
    store::{ShapeHandle, ShapeStore},
};

/// Owns the shapes of one simulation together with the pairs eligible for collision testing.
///
/// Adding or removing a shape here keeps the pair manager in sync. Every circle in the scene
/// shares the segment table of the scene context.
#[derive(Debug, Default)]
pub struct Scene {
    store: ShapeStore,
    pair_manager: ShapePairManager,
    context: Context,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: impl Into<Context>) -> Self {
        Self {
            context: context.into(),
            ..Default::default()
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: ShapeStore::with_capacity(capacity),
            ..Default::default()
        }
    }

    #[inline]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[inline]
    pub fn shapes(&self) -> &ShapeStore {
        &self.store
    }

    #[inline]
    pub fn pair_manager(&self) -> &ShapePairManager {
        &self.pair_manager
    }

    /// Circle sharing the scene's segment table, not yet added to the scene.
    pub fn create_circle(&self, center: impl Into<Point>, radius: FloatNum) -> Shape<'static> {
        Shape::circle(center, radius, self.context.circle_segments().clone())
    }

    pub fn create_polygon(
        &self,
        vertices: impl Into<Vec<Point>>,
    ) -> Result<Shape<'static>, ShapeError> {
        Shape::try_polygon(vertices, self.context.polygon_validation_epsilon())
    }

    pub fn push_shape(&mut self, shape: impl Into<Shape<'static>>) -> ShapeHandle {
        let mut shape = shape.into();
        if let ShapeGeometry::Circle(circle) = shape.geometry_mut() {
            circle.set_segments(self.context.circle_segments().clone());
        }
        let handle = self.store.insert(shape);
        self.pair_manager.add_shape(handle, &self.store);
        handle
    }

    pub fn remove_shape(&mut self, handle: ShapeHandle) -> Option<Shape<'static>> {
        self.pair_manager.remove_shape(handle);
        self.store.remove(handle)
    }

    #[inline]
    pub fn has_shape(&self, handle: ShapeHandle) -> bool {
        self.store.contains(handle)
    }

    #[inline]
    pub fn shape_count(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn shape(&self, handle: ShapeHandle) -> Option<&Shape<'static>> {
        self.store.get(handle)
    }

    /// Mutable access for the integrator. A mass change made here is not seen by the pair
    /// manager, use [`Scene::set_shape_meta`] for that.
    #[inline]
    pub fn shape_mut(&mut self, handle: ShapeHandle) -> Option<&mut Shape<'static>> {
        self.store.get_mut(handle)
    }

    /// Replace the body state of a shape and register its pairs again.
    pub fn set_shape_meta(&mut self, handle: ShapeHandle, meta: impl Into<Meta>) -> bool {
        let Some(shape) = self.store.get_mut(handle) else {
            return false;
        };
        *shape.meta_mut() = meta.into();
        self.pair_manager.remove_shape(handle);
        self.pair_manager.add_shape(handle, &self.store);
        true
    }

    /// Rebuild the circle table and rebind every circle of the scene to it.
    pub fn set_circle_segment_count(&mut self, segment_count: usize) {
        self.context.set_circle_segment_count(segment_count);
        let segments = self.context.circle_segments();

        let mut count = 0;
        for (_, shape) in self.store.iter_mut() {
            if let ShapeGeometry::Circle(circle) = shape.geometry_mut() {
                circle.set_segments(segments.clone());
                count += 1;
            }
        }
        debug!(
            "rebind {} circles to {} segments",
            count,
            self.context.circle_segment_count()
        );
    }

    pub fn detect_pairs(&self, broad_phase: &impl BroadPhase) -> Vec<ShapePair> {
        broad_phase.execute(&self.store, &self.pair_manager)
    }

    pub fn minkowski_point(
        &self,
        pair: &ShapePair,
        direction: &Vector,
    ) -> Option<Result<MinkowskiPoint<'_>, MinkowskiError>> {
        Minkowski::pair_point(&self.store, pair, direction)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.pair_manager.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        collision::broad_phase::{AabbCollider, SimpleBroadPhase},
        meta::{MetaBuilder, Transform},
        shape::{CircleSegmentInfo, ShapeKind},
    };

    #[test]
    fn test_push_and_remove() {
        let mut scene = Scene::new();
        let a = scene.push_shape(Shape::rect(1., 1.));
        let b = scene.push_shape(scene.create_circle((0., 0.), 1.));
        assert_eq!(scene.shape_count(), 2);
        assert_eq!(scene.pair_manager().len(), 1);
        assert_eq!(scene.shape(b).map(|shape| shape.kind()), Some(ShapeKind::Circle));

        assert!(scene.remove_shape(a).is_some());
        assert!(!scene.has_shape(a));
        assert!(scene.pair_manager().is_empty());
        assert!(scene.remove_shape(a).is_none());
    }

    #[test]
    fn test_set_shape_meta_updates_pairs() {
        let mut scene = Scene::new();
        let ground = scene.push_shape(Shape::plane((0., 1.), 0.));
        let wall = scene.push_shape(Shape::rect(1., 10.));
        assert_eq!(scene.pair_manager().len(), 1);

        scene.set_shape_meta(ground, MetaBuilder::new().fixed());
        assert_eq!(scene.pair_manager().len(), 1);
        scene.set_shape_meta(wall, MetaBuilder::new().fixed());
        assert!(scene.pair_manager().is_empty());
        assert!(!scene.set_shape_meta(ShapeHandle::from(7), Meta::default()));
    }

    #[test]
    fn test_set_circle_segment_count_rebinds() {
        let mut scene = Scene::new();
        let foreign = Shape::circle((0., 0.), 1., CircleSegmentInfo::shared(6));
        let circle = scene.push_shape(foreign);
        assert_eq!(scene.shape(circle).unwrap().vertex_count(), 32);

        scene.set_circle_segment_count(12);
        assert_eq!(scene.shape(circle).unwrap().vertex_count(), 12);
        assert_eq!(scene.create_circle((0., 0.), 2.).vertex_count(), 12);
    }

    #[test]
    fn test_create_polygon_uses_epsilon() {
        let scene = Scene::with_context(
            context::ContextBuilder::new().polygon_validation_epsilon(0.5),
        );
        let result = scene.create_polygon(vec![
            Point::new(0., 0.),
            Point::new(0.1, 0.),
            Point::new(1., 1.),
        ]);
        assert_eq!(result.unwrap_err(), ShapeError::DegenerateEdge(0));
    }

    #[test]
    fn test_detect_pairs() {
        let mut scene = Scene::new();
        let a = scene.push_shape(Shape::rect(2., 2.));
        let b = scene.push_shape(
            Shape::rect(2., 2.).with_meta(
                MetaBuilder::new().transform(Transform::new((1.5, 0.), 0.)),
            ),
        );
        scene.push_shape(
            Shape::rect(2., 2.).with_meta(
                MetaBuilder::new().transform(Transform::new((30., 0.), 0.)),
            ),
        );

        let pairs = scene.detect_pairs(&SimpleBroadPhase::new(AabbCollider));
        assert_eq!(pairs, vec![ShapePair::new(a, b)]);

        let point = scene
            .minkowski_point(&pairs[0], &Vector::new(1., 0.))
            .unwrap()
            .unwrap();
        assert!(point.is_valid());

        scene.clear();
        assert_eq!(scene.shape_count(), 0);
        assert!(scene.detect_pairs(&SimpleBroadPhase::new(AabbCollider)).is_empty());
    }
}
