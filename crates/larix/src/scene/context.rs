use std::rc::Rc;

use larix_macro_tools::{Builder, Fields};

use crate::{
    math::FloatNum,
    shape::{circle::DEFAULT_SEGMENT_COUNT, CircleSegmentInfo},
};

#[derive(Clone, Debug, Fields, Builder)]
#[r]
/// tunables shared by every shape a scene creates
pub struct Context {
    // the segment count lives in the table, see `circle_segment_count`
    #[r(skip)]
    #[builder(skip)]
    #[default(CircleSegmentInfo::shared(DEFAULT_SEGMENT_COUNT))]
    circle_segments: Rc<CircleSegmentInfo>,
    // edges shorter than this and reflex turns deeper than this are rejected
    #[w(set)]
    #[default = 1e-5]
    polygon_validation_epsilon: FloatNum,
}

impl Context {
    pub fn circle_segments(&self) -> &Rc<CircleSegmentInfo> {
        &self.circle_segments
    }

    pub fn circle_segment_count(&self) -> usize {
        self.circle_segments.segment_count()
    }

    /// Build a fresh table; circles keep the old one until they are rebound.
    pub fn set_circle_segment_count(&mut self, segment_count: usize) -> &mut Self {
        self.circle_segments = CircleSegmentInfo::shared(segment_count);
        self
    }
}

impl ContextBuilder {
    pub fn circle_segment_count(mut self, segment_count: usize) -> Self {
        self.circle_segments = CircleSegmentInfo::shared(segment_count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::circle::MIN_SEGMENT_COUNT;

    #[test]
    fn test_default_context() {
        let context = Context::default();
        assert_eq!(context.circle_segment_count(), 32);
        assert_eq!(context.polygon_validation_epsilon(), 1e-5);
    }

    #[test]
    fn test_builder() {
        let context = ContextBuilder::new()
            .circle_segment_count(2)
            .polygon_validation_epsilon(1e-3)
            .build();
        assert_eq!(context.circle_segment_count(), MIN_SEGMENT_COUNT);
        assert_eq!(context.polygon_validation_epsilon(), 1e-3);
    }

    #[test]
    fn test_rebuild_segments() {
        let mut context = Context::default();
        let old = context.circle_segments().clone();
        context.set_circle_segment_count(64).set_polygon_validation_epsilon(0.1);
        assert_eq!(context.circle_segment_count(), 64);
        assert_eq!(old.segment_count(), 32);
        assert!(!Rc::ptr_eq(&old, context.circle_segments()));
        assert_eq!(context.polygon_validation_epsilon(), 0.1);
    }
}
