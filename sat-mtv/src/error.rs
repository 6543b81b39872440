//! Errors raised by polygon validation and the overlap solver.

/// Ways in which geometry can collapse so that normals are undefined.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// A polygon needs at least three vertices.
    #[error("a polygon needs at least 3 vertices, but {0} were given")]
    TooFewVertices(usize),
    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
    /// The edge starting at this vertex index has zero length.
    #[error("edge {0} has zero length")]
    ZeroLengthEdge(usize),
    /// A zero-length vector was normalized.
    #[error("a zero-length vector has no direction")]
    ZeroVector,
    /// Two vertices lie on top of each other.
    #[error("two or more vertices are coincident")]
    CoincidentVertices,
    /// Every vertex lies on one line, so the polygon has no area.
    #[error("all vertices are collinear")]
    Collinear,
}

/// Error type for geometry construction and queries.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] Degeneracy),
    #[error("non-adjacent polygon edges intersect")]
    SelfIntersecting,
    #[error("polygon is not convex")]
    NonConvex,
    #[error("there are no candidate axes to test")]
    InvalidAxisSet,
}
