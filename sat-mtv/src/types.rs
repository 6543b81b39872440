//! Common types and vector primitives.

use crate::error::{Degeneracy, GeometryError};
use cgmath::{InnerSpace, Point2, Vector2};

/// 2D point: [`Point2<f64>`].
pub type P2 = Point2<f64>;

/// 2D vector: a [`Vector2<f64>`].
pub type V2 = Vector2<f64>;

/// Euclidean length of a vector: `sqrt(x² + y²)`.
pub fn magnitude(v: V2) -> f64 {
    v.magnitude()
}

/// Scale a vector to unit length.
///
/// # Returns
///
/// - `Ok(unit)`: the unit vector pointing along `v`.
/// - `Err(..)`: [`Degeneracy::ZeroVector`] if `v` has zero length, or if the
///   division overflows to a non-finite vector.
pub fn normalize(v: V2) -> Result<V2, GeometryError> {
    let length = magnitude(v);
    if length == 0.0 {
        return Err(Degeneracy::ZeroVector.into());
    }
    let unit = v / length;
    if unit.x.is_finite() && unit.y.is_finite() {
        Ok(unit)
    } else {
        Err(Degeneracy::ZeroVector.into())
    }
}

/// Rotate a vector 90 degrees anti-clockwise: `(-y, x)`.
pub fn perpendicular(v: V2) -> V2 {
    V2::new(-v.y, v.x)
}

/// Dot product of two vectors.
pub fn dot(a: V2, b: V2) -> f64 {
    a.dot(b)
}

/// Vector from `b` to `a`.
pub fn subtract(a: P2, b: P2) -> V2 {
    a - b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn test_magnitude_of_3_4_is_5() {
        assert_eq!(magnitude(V2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_normalize_gives_unit_length() {
        let unit = normalize(V2::new(-6.0, 8.0)).unwrap();
        assert_close!(unit, V2::new(-0.6, 0.8));
        assert_close!(magnitude(unit), 1.0);
    }

    #[test]
    fn test_normalize_zero_vector_is_degenerate() {
        assert_eq!(
            normalize(V2::new(0.0, 0.0)),
            Err(GeometryError::DegenerateGeometry(Degeneracy::ZeroVector))
        );
    }

    #[test]
    fn test_perpendicular_rotates_anticlockwise() {
        assert_eq!(perpendicular(V2::new(1.0, 0.0)), V2::new(0.0, 1.0));
        assert_eq!(perpendicular(V2::new(0.0, 1.0)), V2::new(-1.0, 0.0));
        assert_eq!(dot(V2::new(2.0, 5.0), perpendicular(V2::new(2.0, 5.0))), 0.0);
    }

    #[test]
    fn test_subtract_points() {
        let v = subtract(P2::new(4.0, 1.0), P2::new(1.0, 3.0));
        assert_eq!(v, V2::new(3.0, -2.0));
    }
}
