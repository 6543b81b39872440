//! Separating axis test with a minimum translation vector.

use crate::{error::GeometryError, polygon::Polygon, V2};
use log::{debug, trace, warn};

/// Result of resolving two overlapping polygons.
///
/// Moving the first polygon passed to [`resolve`] by
/// [`Collision::push_vector`] leaves the two polygons touching, up to
/// rounding, but no longer overlapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Unit axis of least penetration.
    pub push_axis: V2,
    /// Signed distance to move the first polygon along `push_axis`.
    pub push_distance: f64,
}
impl Collision {
    /// The minimum translation vector: `push_axis * push_distance`.
    pub fn push_vector(&self) -> V2 {
        self.push_axis * self.push_distance
    }

    /// Penetration depth along the push axis.
    pub fn depth(&self) -> f64 {
        self.push_distance.abs()
    }
}

/// Largest number of times a push is widened to clear rounding overlap.
const MAX_WIDENINGS: usize = 64;

/// Test two convex polygons for overlap, and find how to separate them.
///
/// Both polygons are projected onto every edge axis of `a` followed by every
/// edge axis of `b`. If any axis shows a gap between the projections, the
/// polygons cannot overlap and the search stops. Projections that only touch
/// at an end point count as a gap, so polygons sharing an edge or a corner do
/// not collide.
///
/// On every other axis the shorter of the two ways of pushing `a` clear of
/// `b` is taken (see [`Interval::push_out`](crate::Interval::push_out)), and
/// the axis with the smallest push wins. When two axes need the same push,
/// the one that is smaller up to sign (comparing `x`, then `y`) is kept, so
/// swapping `a` and `b` picks the same axis or its opposite.
///
/// Translating `a` by the [`push_vector`](Collision::push_vector) always
/// leaves the polygons separated. Where rounding would leave a sliver of
/// overlap, the push distance is widened by a few ulps.
///
/// # Returns
///
/// - `Ok(None)`: if the polygons do not overlap.
/// - `Ok(Some(collision))`: the axis and signed distance to move `a` by.
/// - `Err(GeometryError::InvalidAxisSet)`: if there were no axes to test.
/// - `Err(GeometryError::DegenerateGeometry(..))`: if an edge has no normal.
pub fn resolve(a: &Polygon, b: &Polygon) -> Result<Option<Collision>, GeometryError> {
    let smallest = match smallest_push(a, b)? {
        Some(collision) => widen_until_separated(a, b, collision)?,
        None => return Ok(None),
    };
    debug!(
        "Overlap {} along {:?}",
        smallest.depth(),
        smallest.push_axis
    );
    Ok(Some(smallest))
}

/// Exact minimum push over every axis of `a` and `b`.
fn smallest_push(a: &Polygon, b: &Polygon) -> Result<Option<Collision>, GeometryError> {
    let mut candidates = a.axes()?;
    candidates.extend(b.axes()?);
    if candidates.is_empty() {
        return Err(GeometryError::InvalidAxisSet);
    }

    let mut smallest: Option<Collision> = None;
    for axis in candidates {
        let interval_a = a.project(axis);
        let interval_b = b.project(axis);

        let push_distance = match interval_a.push_out(&interval_b) {
            Some(distance) => distance,
            None => {
                trace!(
                    "Separating axis {:?}: a {:?}, b {:?}",
                    axis,
                    interval_a,
                    interval_b
                );
                return Ok(None);
            }
        };
        trace!(
            "Axis {:?}: a {:?}, b {:?}, push {}",
            axis,
            interval_a,
            interval_b,
            push_distance
        );

        let candidate = Collision {
            push_axis: axis,
            push_distance,
        };
        if smallest.map_or(true, |best| precedes(&candidate, &best)) {
            smallest = Some(candidate);
        }
    }

    Ok(smallest)
}

/// Orders candidate collisions by depth, then by unsigned axis.
fn precedes(candidate: &Collision, best: &Collision) -> bool {
    let (depth, best_depth) = (candidate.depth(), best.depth());
    depth < best_depth
        || (depth == best_depth
            && unsigned_axis(candidate.push_axis) < unsigned_axis(best.push_axis))
}

/// The lesser of `axis` and `-axis`, as an `(x, y)` pair.
fn unsigned_axis(axis: V2) -> (f64, f64) {
    let (pos, neg) = ((axis.x, axis.y), (-axis.x, -axis.y));
    if neg < pos {
        neg
    } else {
        pos
    }
}

/// Grow the push until moving `a` by it leaves no overlap with `b`.
fn widen_until_separated(
    a: &Polygon,
    b: &Polygon,
    collision: Collision,
) -> Result<Collision, GeometryError> {
    let scale = a
        .vertices()
        .iter()
        .chain(b.vertices())
        .fold(collision.depth(), |scale, p| scale.max(p.x.abs()).max(p.y.abs()));
    let mut widening = f64::EPSILON * scale;
    let mut widened = collision;

    for _ in 0..MAX_WIDENINGS {
        let mut moved = a.clone();
        moved.translate_by(widened.push_vector());
        if smallest_push(&moved, b)?.is_none() {
            return Ok(widened);
        }
        trace!("Push {} leaves rounding overlap", widened.push_distance);
        widened.push_distance += widening.copysign(widened.push_distance);
        widening *= 2.0;
    }

    warn!(
        "Push along {:?} still overlaps after {} widenings",
        widened.push_axis, MAX_WIDENINGS
    );
    Ok(widened)
}

/// Test whether two convex polygons overlap.
///
/// This is [`resolve`] without the translation vector: touching polygons do
/// not overlap.
pub fn overlaps(a: &Polygon, b: &Polygon) -> Result<bool, GeometryError> {
    Ok(resolve(a, b)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assert_close,
        compare::{close, Tol},
        P2,
    };
    use proptest::prelude::*;

    fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(vec![
            P2::new(x0, y0),
            P2::new(x1, y0),
            P2::new(x1, y1),
            P2::new(x0, y1),
        ])
        .unwrap()
    }

    fn quad(points: [(f64, f64); 4]) -> Polygon {
        Polygon::new(points.iter().map(|&(x, y)| P2::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn test_far_apart_squares_do_not_collide() {
        let a = rectangle(0.0, 0.0, 10.0, 10.0);
        let b = rectangle(100.0, 100.0, 110.0, 110.0);
        assert_eq!(resolve(&a, &b), Ok(None));
        assert_eq!(overlaps(&a, &b), Ok(false));
    }

    #[test]
    fn test_overlap_along_x_has_correct_depth() {
        let a = rectangle(0.0, 0.0, 1.0, 1.0);
        let b = rectangle(0.7, 0.0, 1.7, 1.0);
        let collision = resolve(&a, &b).unwrap().unwrap();

        let tol = Tol::abs(1e-9);
        assert_close!(tol, collision.depth(), 0.3);
        assert_close!(tol, collision.push_axis.x.abs(), 1.0);
        assert_close!(tol, collision.push_axis.y, 0.0);
        // `a` is pushed away from `b`, towards negative x.
        assert_close!(tol, collision.push_vector(), V2::new(-0.3, 0.0));
    }

    #[test]
    fn test_touching_squares_do_not_collide() {
        let a = rectangle(0.0, 0.0, 1.0, 1.0);
        let edge = rectangle(1.0, 0.0, 2.0, 1.0);
        let corner = rectangle(1.0, 1.0, 2.0, 2.0);
        assert_eq!(resolve(&a, &edge), Ok(None));
        assert_eq!(resolve(&edge, &a), Ok(None));
        assert_eq!(resolve(&a, &corner), Ok(None));
    }

    #[test]
    fn test_applying_push_separates_exactly() {
        let mut a = rectangle(0.0, 0.0, 1.0, 1.0);
        let b = rectangle(0.75, 0.0, 1.75, 1.0);
        let collision = resolve(&a, &b).unwrap().unwrap();
        assert_eq!(collision.push_vector(), V2::new(-0.25, 0.0));

        a.translate_by(collision.push_vector());
        assert_eq!(resolve(&a, &b), Ok(None));
    }

    /// These two polygons have intersecting bounding boxes, but do not
    /// intersect. Only the diagonal axis separates them.
    #[test]
    fn test_separated_by_diagonal_axis() {
        let a = rectangle(4.0, 0.0, 7.0, 3.0);
        let b = quad([(1.0, 1.0), (6.0, 6.0), (5.0, 7.0), (0.0, 2.0)]);
        assert_eq!(resolve(&a, &b), Ok(None));
        assert_eq!(resolve(&b, &a), Ok(None));
    }

    #[test]
    fn test_diagonal_overlap_collides() {
        let a = rectangle(4.0, 0.0, 7.0, 3.0);
        let b = quad([(3.0, 1.0), (8.0, 6.0), (7.0, 7.0), (2.0, 2.0)]);
        assert_eq!(overlaps(&a, &b), Ok(true));
        assert_eq!(overlaps(&b, &a), Ok(true));
    }

    /// A polygon completely contained within another needs the full push out
    /// of the nearest side.
    #[test]
    fn test_contained_polygon_pushes_out_fully() {
        let outer = rectangle(0.0, 0.0, 3.0, 3.0);
        let inner = rectangle(1.0, 1.0, 2.0, 2.0);
        assert_eq!(resolve(&inner, &outer).unwrap().unwrap().depth(), 2.0);
        assert_eq!(resolve(&outer, &inner).unwrap().unwrap().depth(), 2.0);
    }

    #[test]
    fn test_winding_does_not_change_depth() {
        let anticlockwise = rectangle(0.0, 0.0, 1.0, 1.0);
        let clockwise = quad([(0.5, 0.25), (0.5, 1.25), (1.5, 1.25), (1.5, 0.25)]);
        let flipped = quad([(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);

        let a = resolve(&anticlockwise, &clockwise).unwrap().unwrap();
        let b = resolve(&flipped, &clockwise).unwrap().unwrap();
        assert_eq!(a.depth(), 0.5);
        assert_eq!(b.depth(), 0.5);
        assert_eq!(a.push_vector(), b.push_vector());
    }

    #[test]
    fn test_swapped_arguments_push_the_other_way() {
        let square = rectangle(0.0, 0.0, 4.0, 4.0);
        let triangle = Polygon::new(vec![
            P2::new(3.0, 1.0),
            P2::new(9.0, 1.0),
            P2::new(3.0, 3.0),
        ])
        .unwrap();

        let ab = resolve(&square, &triangle).unwrap().unwrap();
        let ba = resolve(&triangle, &square).unwrap().unwrap();
        assert_eq!(ab.depth(), 1.0);
        assert_eq!(ab.depth(), ba.depth());
        // The square's right edge and the triangle's left edge give opposite
        // axes for the same overlap.
        assert_eq!(ab.push_axis, -ba.push_axis);
        assert_eq!(ab.push_vector(), -ba.push_vector());
    }

    /// Two squares overlapping equally along `x` and `y` resolve along the
    /// same axis whichever is passed first.
    #[test]
    fn test_equal_depths_pick_the_same_axis() {
        let a = rectangle(0.0, 0.0, 1.0, 1.0);
        let b = quad([(1.5, 0.5), (1.5, 1.5), (0.5, 1.5), (0.5, 0.5)]);

        let ab = resolve(&a, &b).unwrap().unwrap();
        let ba = resolve(&b, &a).unwrap().unwrap();
        assert_eq!(ab.depth(), 0.5);
        assert_eq!(ba.depth(), 0.5);
        assert_eq!(ab.push_axis, V2::new(-1.0, 0.0));
        assert_eq!(ba.push_axis, V2::new(-1.0, 0.0));
        assert_eq!(ab.push_vector(), V2::new(-0.5, 0.0));
        assert_eq!(ba.push_vector(), V2::new(0.5, 0.0));
    }

    /// Diagonal axes round, so a grid of offsets against a right triangle
    /// hits pushes that need widening.
    #[test]
    fn test_push_separates_across_offset_grid() {
        let square = rectangle(0.0, 0.0, 4.0, 4.0);
        let triangle = Polygon::new(vec![
            P2::new(0.0, 0.0),
            P2::new(3.0, 0.0),
            P2::new(0.0, 3.0),
        ])
        .unwrap();

        let mut collisions = 0;
        for i in 0..200 {
            for j in 0..200 {
                let mut moved = triangle.clone();
                moved.translate(-3.0 + 0.035 * i as f64, -3.0 + 0.035 * j as f64);
                let mut mover = square.clone();
                if let Some(collision) = resolve(&mover, &moved).unwrap() {
                    collisions += 1;
                    mover.translate_by(collision.push_vector());
                    assert_eq!(resolve(&mover, &moved), Ok(None), "offset ({}, {})", i, j);
                }
            }
        }
        assert!(collisions > 30_000);
    }

    proptest! {
        /// Swapping the polygons gives the same depth, up to widening, along
        /// the same axis or its opposite.
        #[test]
        fn test_depth_is_symmetric(dx in -6.0f64..6.0, dy in -6.0f64..6.0) {
            let square = rectangle(0.0, 0.0, 4.0, 4.0);
            let mut triangle = Polygon::new(vec![
                P2::new(0.0, 0.0),
                P2::new(3.0, 0.0),
                P2::new(0.0, 3.0),
            ]).unwrap();
            triangle.translate(dx, dy);

            let ab = resolve(&square, &triangle).unwrap();
            let ba = resolve(&triangle, &square).unwrap();
            prop_assert_eq!(ab.is_some(), ba.is_some());
            if let (Some(ab), Some(ba)) = (ab, ba) {
                prop_assert!(close(Tol::abs(1e-12), &ab.depth(), &ba.depth()));
                prop_assert!(ab.push_axis == ba.push_axis || ab.push_axis == -ba.push_axis);
            }
        }

        /// Any overlap found is removed by a single push.
        #[test]
        fn test_push_resolves_overlap(dx in -4.0f64..4.0, dy in -4.0f64..4.0) {
            let mut square = rectangle(0.0, 0.0, 4.0, 4.0);
            let mut triangle = Polygon::new(vec![
                P2::new(0.0, 0.0),
                P2::new(3.0, 0.0),
                P2::new(0.0, 3.0),
            ]).unwrap();
            triangle.translate(dx + 2.0, dy + 2.0);

            if let Some(collision) = resolve(&square, &triangle).unwrap() {
                prop_assert!(collision.depth() > 0.0);
                square.translate_by(collision.push_vector());
                prop_assert_eq!(resolve(&square, &triangle), Ok(None));
            }
        }

        /// A gap on any axis means no collision: boxes separated along x
        /// never collide, however they overlap along y.
        #[test]
        fn test_gap_is_never_overridden(gap in 1e-6f64..10.0, dy in -0.9f64..0.9) {
            let a = rectangle(0.0, 0.0, 1.0, 1.0);
            let b = rectangle(1.0 + gap, dy, 2.0 + gap, dy + 1.0);
            prop_assert_eq!(resolve(&a, &b), Ok(None));
        }
    }
}
