pub mod broad_phase;
pub mod minkowski;
pub mod pair;
pub mod support;

pub use broad_phase::{AabbCollider, BroadPhase, Collider, SimpleBroadPhase};
pub use minkowski::{Minkowski, MinkowskiError, MinkowskiPoint};
pub use pair::{PairId, PairKey, ShapePair, ShapePairManager};
pub use support::SupportPoint;
