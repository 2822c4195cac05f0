pub mod collision;
pub mod math;
pub mod meta;
pub mod scene;
pub mod shape;

pub mod prelude {
    pub use super::collision::{
        AabbCollider, BroadPhase, Collider, Minkowski, MinkowskiError, MinkowskiPoint, PairKey,
        ShapePair, ShapePairManager, SimpleBroadPhase, SupportPoint,
    };
    pub use super::math::{axis::AxisDirection, point::Point, vector::Vector, FloatNum};
    pub use super::meta::{Mass, Meta, MetaBuilder, Transform};
    pub use super::scene::{
        context::{Context, ContextBuilder},
        store::{ShapeHandle, ShapeStore},
        Scene,
    };
    pub use super::shape::{
        BoundingBox, Circle, CircleSegmentInfo, Edge, Plane, Polygon, Shape, ShapeError,
        ShapeGeometry, ShapeKind,
    };
}
