use larix_macro_tools::Fields;

use crate::math::{point::Point, tau, vector::Vector, FloatNum};

use super::ShapeError;

/// Convex polygon in local space, wound counterclockwise.
///
/// `edges[i]` runs from `vertices[i]` to `vertices[i + 1]`, `normals[i]` is its outward unit
/// normal. The three lists always have the same length.
#[derive(Clone, Debug, Default, Fields)]
#[r]
pub struct Polygon {
    vertices: Vec<Point>,
    edges: Vec<Vector>,
    normals: Vec<Vector>,
}

impl Polygon {
    /// Build a polygon without validation. A zero length edge gets a zero normal.
    pub fn new(vertices: impl Into<Vec<Point>>) -> Self {
        let vertices = vertices.into();
        let n = vertices.len();

        let edges: Vec<Vector> = (0..n)
            .map(|i| vertices[(i + 1) % n] - vertices[i])
            .collect();

        let normals = edges
            .iter()
            .map(|edge| (!*edge).try_normalize().unwrap_or_default())
            .collect();

        Self {
            vertices,
            edges,
            normals,
        }
    }

    pub fn try_new(vertices: impl Into<Vec<Point>>, epsilon: FloatNum) -> Result<Self, ShapeError> {
        let polygon = Self::new(vertices);
        let n = polygon.len();

        if n < 3 {
            return Err(ShapeError::TooFewVertices(n));
        }

        if let Some(i) = polygon.edges.iter().position(|edge| edge.abs() <= epsilon) {
            return Err(ShapeError::DegenerateEdge(i));
        }

        if polygon.signed_area() <= 0. {
            return Err(ShapeError::ClockwiseWinding);
        }

        for i in 0..n {
            let prev = polygon.edges[(i + n - 1) % n];
            let next = polygon.edges[i];
            if prev ^ next < -epsilon {
                return Err(ShapeError::NotConvex(i));
            }
        }

        Ok(polygon)
    }

    /// Axis aligned box centered on the local origin.
    pub fn aabb(half_width: FloatNum, half_height: FloatNum) -> Self {
        Self::new(vec![
            Point::new(-half_width, -half_height),
            Point::new(half_width, -half_height),
            Point::new(half_width, half_height),
            Point::new(-half_width, half_height),
        ])
    }

    pub fn rect(width: FloatNum, height: FloatNum) -> Self {
        Self::aabb(width * 0.5, height * 0.5)
    }

    // reorder to counterclockwise
    pub fn triangle(a: impl Into<Point>, b: impl Into<Point>, c: impl Into<Point>) -> Self {
        let (a, b, c) = (a.into(), b.into(), c.into());
        if (b - a) ^ (c - a) < 0. {
            Self::new(vec![a, c, b])
        } else {
            Self::new(vec![a, b, c])
        }
    }

    /// Regular polygon around the local origin, the first vertex is `(0, radius)`.
    pub fn regular(edge_count: usize, radius: FloatNum) -> Self {
        let edge_count = edge_count.max(3);
        let step = tau() / edge_count as FloatNum;
        let start = Vector::new(0., radius);
        Self::new(
            (0..edge_count)
                .map(|i| start.rotate(step * i as FloatNum).to_point())
                .collect::<Vec<_>>(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex at `index` modulo the vertex count.
    ///
    /// # Panics
    ///
    /// Panics if the polygon has no vertices.
    #[inline]
    pub fn vertex(&self, index: usize) -> Point {
        assert!(!self.is_empty(), "an empty polygon has no vertices");
        self.vertices[index % self.len()]
    }

    /// Edge starting at vertex `index`, modulo the vertex count.
    ///
    /// # Panics
    ///
    /// Panics if the polygon has no vertices.
    #[inline]
    pub fn edge(&self, index: usize) -> Vector {
        assert!(!self.is_empty(), "an empty polygon has no edges");
        self.edges[index % self.len()]
    }

    // twice the area is the sum of the edge cross products
    pub fn signed_area(&self) -> FloatNum {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| v.to_vector() ^ self.vertex(i + 1).to_vector())
            .sum::<FloatNum>()
            * 0.5
    }

    /// Vertex with the greatest dot product along `direction`, the first one wins a tie.
    ///
    /// `None` for an empty polygon or a non-finite direction.
    pub fn support(&self, direction: &Vector) -> Option<(usize, Point)> {
        if !direction.is_finite() {
            return None;
        }

        let mut result: Option<(usize, FloatNum)> = None;

        for (i, vertex) in self.vertices.iter().enumerate() {
            let dot = vertex.to_vector() * *direction;
            match result {
                Some((_, max)) if dot <= max => {}
                _ => result = Some((i, dot)),
            }
        }

        result.map(|(i, _)| (i, self.vertices[i]))
    }
}
