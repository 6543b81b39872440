use crate::{types::magnitude, P2, V2};

/// Line segment between two points.
///
/// To construct a line, use [`Line::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point of the line.
    a: P2,
    /// End point of the line.
    b: P2,
}
impl Line {
    /// Create a new line from two points.
    ///
    /// The points must not lie on top of each other, otherwise a degenerate
    /// line is produced.
    pub fn new(a: P2, b: P2) -> Line {
        Line { a, b }
    }

    /// Returns the start point of the line.
    pub fn start(&self) -> P2 {
        self.a
    }

    /// Returns the end point of the line.
    pub fn end(&self) -> P2 {
        self.b
    }

    /// Return the vector along the line, from its start to its end.
    pub fn ab_vec(&self) -> V2 {
        self.b - self.a
    }

    /// Evaluate the line at parameter value `t`.
    ///
    /// `t=0` is the start of the line and `t=1` is its end. Values outside
    /// `[0, 1]` give collinear points beyond the end points.
    pub fn eval_param(&self, t: f64) -> P2 {
        self.a + t * self.ab_vec()
    }

    /// Find the point where this line segment crosses another.
    ///
    /// Segments that meet at an end point count as crossing. Parallel
    /// segments (including collinear, overlapping ones) never do.
    ///
    /// # Returns
    ///
    /// - `Some(point)`: the intersection point.
    /// - `None`: if the segments do not cross, or are parallel.
    pub fn intersection(&self, other: &Line) -> Option<P2> {
        let r = self.ab_vec();
        let s = other.ab_vec();
        let denom = cross(r, s);
        // Nearly-zero values, relative to the segment lengths, are parallel.
        if denom.abs() <= f64::EPSILON * magnitude(r) * magnitude(s) {
            return None;
        }

        // Solve a + t r = c + u s for t and u.
        let qp = other.a - self.a;
        let t = cross(qp, s) / denom;
        let u = cross(qp, r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.eval_param(t))
        } else {
            None
        }
    }
}

/// Return the 2D cross product: `a x b`.
pub(crate) fn cross(a: V2, b: V2) -> f64 {
    a.x * b.y - a.y * b.x
}
