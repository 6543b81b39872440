//! 2D convex polygons.

use crate::{
    error::{Degeneracy, GeometryError},
    interval::Interval,
    line::{cross, Line},
    types::{dot, magnitude, normalize, perpendicular, subtract},
    P2, V2,
};
use cgmath::EuclideanSpace;
use kiddo::{KdTree, SquaredEuclidean};

/// Closed convex polygon.
///
/// A polygon contains an ordered sequence of points, which are connected by
/// straight lines. The last point of the polygon is also connected to the first
/// point by a straight line.
///
/// To construct a Polygon, use [`Polygon::new`], which checks that the
/// vertices describe a simple, convex polygon with a well-defined normal on
/// every edge. The number and order of vertices never change afterwards; only
/// [`Polygon::translate`] moves them.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices of the polygon.
    vertices: Vec<P2>,
}
impl Polygon {
    /// Vertices closer together than this fraction of the polygon's extent
    /// are treated as coincident.
    pub const COINCIDENT_TOLERANCE: f64 = 1e-9;

    /// Creates a new `Polygon` from the given vertices.
    ///
    /// # Parameters
    ///
    /// - `vertices`: The vertices of the polygon in order. Either winding
    ///   direction is accepted, but it must be the same at every vertex.
    ///
    /// # Returns
    ///
    /// - `Ok(polygon)`: if the vertices form a simple convex polygon.
    /// - `Err(GeometryError::DegenerateGeometry(..))`: if there are fewer than
    ///   3 vertices, a non-finite coordinate, a zero-length edge, coincident
    ///   vertices, or if every vertex lies on one line.
    /// - `Err(GeometryError::SelfIntersecting)`: if two non-adjacent edges
    ///   cross.
    /// - `Err(GeometryError::NonConvex)`: if the winding direction changes
    ///   between vertices.
    pub fn new(vertices: Vec<P2>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(Degeneracy::TooFewVertices(vertices.len()).into());
        }
        if let Some(i) = vertices
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(Degeneracy::NonFiniteVertex(i).into());
        }

        // Computing the axes catches zero-length edges.
        axes(&vertices)?;

        let polygon = Polygon { vertices };
        let min_dist = Self::COINCIDENT_TOLERANCE * polygon.extent();
        if points_coincident(min_dist, polygon.vertices.iter()) {
            return Err(Degeneracy::CoincidentVertices.into());
        }

        let windings: Vec<WindingDirection> = (0..polygon.len())
            .filter_map(|vertex| polygon.winding_direction(vertex))
            .collect();
        if windings.is_empty() {
            return Err(Degeneracy::Collinear.into());
        }
        if non_adjacent_edges_intersect(&polygon) {
            return Err(GeometryError::SelfIntersecting);
        }
        if !all_equal(windings.into_iter()) {
            return Err(GeometryError::NonConvex);
        }

        Ok(polygon)
    }

    /// Returns the vertices of the polygon, in order.
    pub fn vertices(&self) -> &[P2] {
        &self.vertices
    }

    /// Returns the number of vertices (and edges) of the polygon.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`: a polygon has at least three vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Construct all edges of the polygon.
    ///
    /// This returns an iterator which will produce all the lines that are the
    /// edges of the polygon, drawn between its pairs of vertices.
    pub fn edges(&self) -> impl Iterator<Item = Line> + use<'_> {
        self.vertices
            .iter()
            .zip(self.vertices.iter().skip(1).chain(self.vertices.first()))
            .map(|(a, b)| Line::new(*a, *b))
    }

    /// Unit normals of every edge, in vertex order.
    ///
    /// See the free function [`axes`].
    pub fn axes(&self) -> Result<Vec<V2>, GeometryError> {
        axes(&self.vertices)
    }

    /// Project the polygon onto an axis.
    ///
    /// Every vertex is dotted with `axis`, and the range of the results is
    /// returned.
    pub fn project(&self, axis: V2) -> Interval {
        // There are always at least three vertices.
        shadow(axis, &self.vertices[0], &self.vertices[1..])
    }

    /// Move every vertex of the polygon by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.translate_by(V2::new(dx, dy));
    }

    /// Move every vertex of the polygon by `offset`.
    pub fn translate_by(&mut self, offset: V2) {
        for vertex in self.vertices.iter_mut() {
            *vertex += offset;
        }
    }

    /// Check if this `Polygon` is a simple polygon.
    ///
    /// A simple polygon has no duplicate vertices, and no edges that intersect
    /// one another. Every polygon that passed [`Polygon::new`] is simple at
    /// [`Polygon::COINCIDENT_TOLERANCE`] times its [`extent`](Polygon::extent);
    /// a larger `min_dist` can be used to look for nearly-coincident vertices.
    ///
    /// # Parameters
    ///
    /// - `min_dist` distance below which vertices of the polygon are assumed
    ///   to be coincident.
    pub fn is_simple(&self, min_dist: f64) -> bool {
        let pt_test = points_coincident(min_dist, self.vertices.iter());
        let edge_test = non_adjacent_edges_intersect(self);
        !(pt_test || edge_test)
    }

    /// Return the winding direction at a vertex.
    ///
    /// See [`WindingDirection`] for how the direction is defined.
    ///
    /// # Returns
    ///
    /// - `None`: if the vertices are approximately collinear, and no winding
    ///   direction is defined.
    /// - `Some(direction)`: if the winding direction is defined.
    pub fn winding_direction(&self, vertex: usize) -> Option<WindingDirection> {
        let n = self.vertices.len();
        assert!(vertex < n);

        // Previous and next indices wrap around the polygon ends.
        let i_prev = if vertex == 0 { n - 1 } else { vertex - 1 };
        let i_next = (vertex + 1) % n;

        let p0 = self.vertices[i_prev];
        let p1 = self.vertices[vertex];
        let p2 = self.vertices[i_next];

        let a = subtract(p1, p0);
        let b = subtract(p2, p1);
        let turn = cross(a, b);

        // Nearly-zero values, relative to the edge lengths, are collinear.
        if turn.abs() <= f64::EPSILON * magnitude(a) * magnitude(b) {
            None
        } else if turn > 0.0 {
            Some(WindingDirection::Anticlockwise)
        } else {
            Some(WindingDirection::Clockwise)
        }
    }

    /// Winding direction of the whole polygon.
    ///
    /// With the `(-y, x)` perpendicular used for [`axes`], the axes of an
    /// anticlockwise polygon point inwards and those of a clockwise polygon
    /// point outwards.
    pub fn winding(&self) -> WindingDirection {
        if self.signed_area() > 0.0 {
            WindingDirection::Anticlockwise
        } else {
            WindingDirection::Clockwise
        }
    }

    /// Checks if this `Polygon` is convex.
    ///
    /// A convex polygon has all angles turning in the same direction.
    pub fn is_convex(&self) -> bool {
        all_equal((0..self.vertices.len()).filter_map(|vertex| self.winding_direction(vertex)))
    }

    /// Computes the centroid of a `Polygon`.
    pub fn centroid(&self) -> P2 {
        let mut cx: f64 = 0.0;
        let mut cy: f64 = 0.0;
        for edge in self.edges() {
            let pi = edge.start();
            let pj = edge.end();
            let z = pi.x * pj.y - pj.x * pi.y;
            cx += (pi.x + pj.x) * z;
            cy += (pi.y + pj.y) * z;
        }

        let sa = self.signed_area();
        P2::new(cx / (6.0 * sa), cy / (6.0 * sa))
    }

    /// Largest side of the axis-aligned bounding box.
    pub fn extent(&self) -> f64 {
        let (x, y) = self.vertices.iter().skip(1).fold(
            (Interval::singleton(self.vertices[0].x), Interval::singleton(self.vertices[0].y)),
            |(mut x, mut y), p| {
                x.include(p.x);
                y.include(p.y);
                (x, y)
            },
        );
        (x.max() - x.min()).max(y.max() - y.min())
    }

    /// Shoelace area; positive for anticlockwise polygons.
    fn signed_area(&self) -> f64 {
        self.edges()
            .map(|edge| {
                let (pi, pj) = (edge.start(), edge.end());
                pi.x * pj.y - pj.x * pi.y
            })
            .sum::<f64>()
            / 2.0
    }
}

/// Unit normals of every edge of a closed loop of vertices.
///
/// For each edge `(v[i], v[(i+1) mod n])`, the edge vector is rotated by 90
/// degrees with [`perpendicular`] and normalized. Exactly `n` axes are
/// produced, in vertex order.
///
/// # Returns
///
/// - `Ok(axes)`: one unit axis per edge.
/// - `Err(..)`: [`Degeneracy::TooFewVertices`] for fewer than 3 vertices, or
///   [`Degeneracy::ZeroLengthEdge`] naming the first edge with no direction.
pub fn axes(vertices: &[P2]) -> Result<Vec<V2>, GeometryError> {
    let n = vertices.len();
    if n < 3 {
        return Err(Degeneracy::TooFewVertices(n).into());
    }
    (0..n)
        .map(|i| {
            let edge = subtract(vertices[(i + 1) % n], vertices[i]);
            normalize(perpendicular(edge))
                .map_err(|_| GeometryError::from(Degeneracy::ZeroLengthEdge(i)))
        })
        .collect()
}

/// Project vertices onto an axis, producing the interval they cover.
///
/// # Returns
///
/// - `Ok(interval)`: `(min, max)` of the vertices dotted with `axis`.
/// - `Err(..)`: [`Degeneracy::TooFewVertices`] if `vertices` is empty.
pub fn project(vertices: &[P2], axis: V2) -> Result<Interval, GeometryError> {
    let (p_first, rest) = vertices
        .split_first()
        .ok_or(Degeneracy::TooFewVertices(0))?;
    Ok(shadow(axis, p_first, rest))
}

fn shadow(axis: V2, p_first: &P2, rest: &[P2]) -> Interval {
    let mut interval = Interval::singleton(dot(axis, p_first.to_vec()));
    for p in rest {
        interval.include(dot(axis, p.to_vec()));
    }
    interval
}

/// Winding direction.
///
/// Each vertex in the polygon has a winding direction. This is defined as
/// follows:
///
/// 1. Let `i` be the vertex of interest.
/// 2. Define `a` to be the vector from the previous vertex to the current
///    vertex: `a = points[i] - points[i-1]`
/// 3. Define `b` to be the vector from the current vertex to the next
///    vertex: `b = points[i+1] - points[i]`.
///
/// The rotation FROM `a` to get to `b` is either `Clockwise` or
/// `Anticlockwise`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindingDirection {
    /// Clockwise winding at the current vertex.
    Clockwise,
    /// Anticlockwise winding at the current vertex.
    Anticlockwise,
}

/// Check if all items in an iterator are equal.
///
/// If the iterator is empty, this returns `true`.
fn all_equal<A: PartialEq>(mut iter: impl Iterator<Item = A>) -> bool {
    match iter.next() {
        None => true,
        Some(reference_item) => iter.all(|item| item == reference_item),
    }
}

/// Checks if any supplied points are coincident up to a supplied minimum
/// distance.
///
/// This places the points inside a [`KdTree`] to speed up checks.
///
/// # Returns
///
/// - `true` if at least two points lie within `min_dist` of each other
/// - `false` if there are no coincident points
fn points_coincident<'a>(min_dist: f64, points: impl Iterator<Item = &'a P2>) -> bool {
    let mut kd_tree: KdTree<f64, 2> = KdTree::new();
    let radius = min_dist * min_dist;

    for (index, p) in points.enumerate() {
        if kd_tree
            .within_unsorted_iter::<SquaredEuclidean>(&[p.x, p.y], radius)
            .next()
            .is_some()
        {
            return true;
        }
        kd_tree.add(&[p.x, p.y], index as u64);
    }

    false
}

/// Checks if any non-adjacent edges of a polygon intersect.
fn non_adjacent_edges_intersect(polygon: &Polygon) -> bool {
    let edges: Vec<Line> = polygon.edges().collect();

    // Compare all pairs of edges, skipping adjacent edges.
    for i in 0..(edges.len() - 2) {
        for j in (i + 2)..edges.len() {
            if i == 0 && j == edges.len() - 1 {
                continue;
            }
            if edges[i].intersection(&edges[j]).is_some() {
                return true;
            }
        }
    }

    false
}
