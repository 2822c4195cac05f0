use std::{cmp::Ordering, rc::Rc};

use larix_macro_tools::Fields;
use log::{debug, warn};

use crate::math::{point::Point, tau, vector::Vector, FloatNum};

pub const MIN_SEGMENT_COUNT: usize = 5;

pub const DEFAULT_SEGMENT_COUNT: usize = 32;

/// Polygonal approximation of the unit circle.
///
/// Vertex `i` sits at angle `i * step`, counterclockwise from `(1, 0)`, so the vertex list
/// is already ordered by polar angle and a support query is a binary search.
#[derive(Clone, Debug, Fields)]
#[r]
pub struct CircleSegmentInfo {
    segment_count: usize,
    step: FloatNum,
    #[r(skip)]
    step_cos: FloatNum,
    #[r(skip)]
    step_sin: FloatNum,
    #[r(skip)]
    half_step_cos: FloatNum,
    #[r(skip)]
    half_step_sin: FloatNum,
    vertices: Vec<Vector>,
    edges: Vec<Vector>,
    normals: Vec<Vector>,
}

impl Default for CircleSegmentInfo {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_COUNT)
    }
}

impl CircleSegmentInfo {
    pub fn new(segment_count: usize) -> Self {
        let mut info = Self {
            segment_count: 0,
            step: 0.,
            step_cos: 1.,
            step_sin: 0.,
            half_step_cos: 1.,
            half_step_sin: 0.,
            vertices: Vec::new(),
            edges: Vec::new(),
            normals: Vec::new(),
        };
        info.set_segment_count(segment_count);
        info
    }

    pub fn shared(segment_count: usize) -> Rc<Self> {
        Rc::new(Self::new(segment_count))
    }

    pub fn set_segment_count(&mut self, segment_count: usize) {
        let segment_count = if segment_count < MIN_SEGMENT_COUNT {
            warn!(
                "circle segment count {} is below the minimum, use {}",
                segment_count, MIN_SEGMENT_COUNT
            );
            MIN_SEGMENT_COUNT
        } else {
            segment_count
        };

        let step = tau() / segment_count as FloatNum;
        (self.step_sin, self.step_cos) = step.sin_cos();
        (self.half_step_sin, self.half_step_cos) = (step * 0.5).sin_cos();
        self.step = step;
        self.segment_count = segment_count;

        self.vertices.clear();
        self.vertices.extend((0..segment_count).map(|i| {
            let (sin, cos) = (i as FloatNum * step).sin_cos();
            Vector::new(cos, sin)
        }));

        self.edges.clear();
        self.edges.extend(
            (0..segment_count)
                .map(|i| self.vertices[(i + 1) % segment_count] - self.vertices[i]),
        );

        self.normals.clear();
        self.normals
            .extend(self.edges.iter().map(|&edge| (!edge).normalize()));

        debug!("rebuild circle segment table with {} segments", segment_count);
    }

    #[inline]
    pub fn vertex(&self, index: usize, center: &Point, radius: FloatNum) -> Point {
        *center + self.vertices[index % self.segment_count] * radius
    }

    #[inline]
    pub fn edge_vector(&self, index: usize, radius: FloatNum) -> Vector {
        self.edges[index % self.segment_count] * radius
    }

    #[inline]
    pub fn normal(&self, index: usize) -> Vector {
        self.normals[index % self.segment_count]
    }

    pub fn rotate_forward(&self, v: &Vector) -> Vector {
        v.rotate_by(self.step_cos, self.step_sin)
    }

    pub fn rotate_backward(&self, v: &Vector) -> Vector {
        v.rotate_by(self.step_cos, -self.step_sin)
    }

    pub fn rotate_half_forward(&self, v: &Vector) -> Vector {
        v.rotate_by(self.half_step_cos, self.half_step_sin)
    }

    pub fn rotate_half_backward(&self, v: &Vector) -> Vector {
        v.rotate_by(self.half_step_cos, -self.half_step_sin)
    }

    /// Index of the vertex with the greatest dot product along `direction`, the lower index
    /// wins a tie.
    ///
    /// Rotating the direction forward by half a step turns "nearest vertex" into "last vertex
    /// whose angle is below the direction", found by binary search over the angle order.
    pub fn support_index(&self, direction: &Vector) -> usize {
        if direction.is_zero() || !direction.is_finite() {
            return 0;
        }

        let shifted = self.rotate_half_forward(direction);

        let count = self
            .vertices
            .partition_point(|v| v.cmp_angle(&shifted) == Ordering::Less);

        let candidate = if count == 0 {
            self.segment_count - 1
        } else {
            count - 1
        };

        self.settle_tie(candidate, direction)
    }

    // near a midpoint the rounded search can land one vertex off
    fn settle_tie(&self, candidate: usize, direction: &Vector) -> usize {
        let n = self.segment_count;
        let mut neighbors = [(candidate + n - 1) % n, candidate, (candidate + 1) % n];
        neighbors.sort_unstable();

        let mut best = candidate;
        let mut best_dot = FloatNum::NEG_INFINITY;
        for index in neighbors {
            let dot = self.vertices[index] * *direction;
            if dot > best_dot {
                best = index;
                best_dot = dot;
            }
        }
        best
    }

    pub fn support(&self, direction: &Vector, center: &Point, radius: FloatNum) -> (usize, Point) {
        let index = self.support_index(direction);
        (index, self.vertex(index, center, radius))
    }
}

#[derive(Clone, Debug, Fields)]
#[r]
pub struct Circle {
    #[r(copy)]
    center: Point,
    radius: FloatNum,
    #[r(skip)]
    segments: Rc<CircleSegmentInfo>,
}

impl Circle {
    pub fn new(center: impl Into<Point>, radius: FloatNum, segments: Rc<CircleSegmentInfo>) -> Self {
        Self {
            center: center.into(),
            radius,
            segments,
        }
    }

    pub fn segments(&self) -> &CircleSegmentInfo {
        &self.segments
    }

    pub fn set_segments(&mut self, segments: Rc<CircleSegmentInfo>) {
        self.segments = segments;
    }

    pub fn segment_count(&self) -> usize {
        self.segments.segment_count()
    }

    pub fn vertex(&self, index: usize) -> Point {
        self.segments.vertex(index, &self.center, self.radius)
    }

    pub fn edge_vector(&self, index: usize) -> Vector {
        self.segments.edge_vector(index, self.radius)
    }

    pub fn support(&self, direction: &Vector) -> (usize, Point) {
        self.segments.support(direction, &self.center, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    // the authoritative definition, first max wins
    fn brute_force_support(info: &CircleSegmentInfo, direction: &Vector) -> usize {
        let mut best = 0;
        let mut best_dot = FloatNum::NEG_INFINITY;
        for (i, v) in info.vertices().iter().enumerate() {
            let dot = *v * *direction;
            if dot > best_dot {
                best = i;
                best_dot = dot;
            }
        }
        best
    }

    #[test]
    fn test_segment_count_clamped() {
        let info = CircleSegmentInfo::new(3);
        assert_eq!(info.segment_count(), MIN_SEGMENT_COUNT);
        assert_eq!(info.vertices().len(), MIN_SEGMENT_COUNT);
        assert_eq!(info.edges().len(), MIN_SEGMENT_COUNT);
        assert_eq!(info.normals().len(), MIN_SEGMENT_COUNT);
    }

    #[test]
    fn test_vertices_are_exact_angles() {
        let info = CircleSegmentInfo::new(12);
        for (i, v) in info.vertices().iter().enumerate() {
            let (sin, cos) = (i as FloatNum * info.step()).sin_cos();
            assert_eq!(*v, Vector::new(cos, sin));
        }
    }

    #[test]
    fn test_normals_point_outward() {
        let info = CircleSegmentInfo::new(16);
        for i in 0..info.segment_count() {
            let normal = info.normal(i);
            assert!((normal.abs() - 1.).abs() < 1e-5);
            let mid = info.vertices()[i] + info.edges()[i] * 0.5;
            assert!(normal * mid > 0.);
            assert!((normal * info.edges()[i]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rebuild_changes_resolution() {
        let mut info = CircleSegmentInfo::new(8);
        info.set_segment_count(64);
        assert_eq!(info.segment_count(), 64);
        assert_eq!(info.vertices().len(), 64);
        assert!((info.step() - tau() / 64.).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_forward_and_backward() {
        let info = CircleSegmentInfo::new(10);
        let v = info.vertices()[3];
        assert!((info.rotate_forward(&v) - info.vertices()[4]).abs() < 1e-5);
        assert!((info.rotate_backward(&v) - info.vertices()[2]).abs() < 1e-5);
        let back = info.rotate_half_backward(&info.rotate_half_forward(&v));
        assert!((back - v).abs() < 1e-5);
    }

    #[test]
    fn test_support_on_vertex_directions() {
        for segment_count in [5, 6, 7, 16, 32, 33, 100] {
            let info = CircleSegmentInfo::new(segment_count);
            for (i, v) in info.vertices().iter().enumerate() {
                assert_eq!(info.support_index(v), i, "segments {}", segment_count);
                assert_eq!(brute_force_support(&info, v), i);
            }
        }
    }

    #[test]
    fn test_support_matches_brute_force_for_random_directions() {
        let mut rng = StdRng::seed_from_u64(7);
        for segment_count in [5, 9, 32, 64] {
            let info = CircleSegmentInfo::new(segment_count);
            for _ in 0..500 {
                let angle: FloatNum = rng.gen_range(0. ..tau());
                let length: FloatNum = rng.gen_range(0.01..100.);
                let direction = Vector::new(1., 0.).rotate(angle) * length;
                assert_eq!(
                    info.support_index(&direction),
                    brute_force_support(&info, &direction),
                    "angle {} segments {}",
                    angle,
                    segment_count
                );
            }
        }
    }

    #[test]
    fn test_support_tie_between_vertices_picks_lower_index() {
        for segment_count in [5, 8, 9, 32, 33] {
            let info = CircleSegmentInfo::new(segment_count);
            for i in 0..segment_count {
                let next = (i + 1) % segment_count;
                let midpoint = info.vertices()[i] + info.vertices()[next];
                let index = info.support_index(&midpoint);
                assert_eq!(
                    index,
                    brute_force_support(&info, &midpoint),
                    "mid {} segments {}",
                    i,
                    segment_count
                );
                assert!(index == i || index == next);
            }
        }
    }

    #[test]
    fn test_support_wraps_around_zero_angle() {
        let info = CircleSegmentInfo::new(8);
        let just_below_zero = Vector::new(1., 0.).rotate(-0.1);
        assert_eq!(info.support_index(&just_below_zero), 0);
        let near_last = Vector::new(1., 0.).rotate(-info.step());
        assert_eq!(info.support_index(&near_last), 7);
    }

    #[test]
    fn test_zero_direction() {
        let info = CircleSegmentInfo::new(8);
        assert_eq!(info.support_index(&Vector::default()), 0);
    }

    #[test]
    fn test_circle_support_point() {
        let info = CircleSegmentInfo::shared(32);
        let circle = Circle::new((2., 3.), 4., info);
        let (index, point) = circle.support(&Vector::new(0., 1.));
        assert_eq!(index, 8);
        assert!((point - Point::new(2., 7.)).abs() < 1e-5);
        assert!((circle.vertex(index + 1) - (point + circle.edge_vector(index))).abs() < 1e-5);
    }
}
