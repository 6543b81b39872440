/// Interval of floating-point values, such as the shadow of a polygon on an
/// axis.
///
/// It includes both its end points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    start: f64,
    end: f64,
}
impl Interval {
    /// Creates an interval with two end points.
    ///
    /// The order of `p1` and `p2` is not important.
    pub fn new(p1: f64, p2: f64) -> Interval {
        let mut interval = Interval::singleton(p1);
        interval.include(p2);
        interval
    }

    /// Create a singleton interval which contains just one `f64` value.
    pub fn singleton(value: f64) -> Interval {
        Interval {
            start: value,
            end: value,
        }
    }

    /// Expand an interval, if necessary, to include another `f64` value.
    pub fn include(&mut self, value: f64) {
        if value < self.start {
            self.start = value;
        } else if value > self.end {
            self.end = value;
        }
    }

    /// Tests if a value is contained by this interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }

    /// Tests if two intervals leave no interior in common.
    ///
    /// Intervals that only share an end point are separated: `p1.min() -
    /// p2.max() >= 0` or `p2.min() - p1.max() >= 0`.
    pub fn separated(&self, other: &Interval) -> bool {
        self.start - other.end >= 0.0 || other.start - self.end >= 0.0
    }

    /// Tests if two intervals share some interior.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !self.separated(other)
    }

    /// Signed distance to move this interval so it just touches `other`.
    ///
    /// Of the two ways out, moving forward by `other.max() - self.min()` or
    /// backward by `other.min() - self.max()`, the shorter one is returned. On
    /// a tie the forward distance is returned.
    ///
    /// # Returns
    ///
    /// - `None`: if the intervals are [`separated`](Interval::separated).
    /// - `Some(distance)`: the signed push distance, never zero.
    pub fn push_out(&self, other: &Interval) -> Option<f64> {
        if self.separated(other) {
            return None;
        }
        let forward = other.end - self.start;
        let backward = other.start - self.end;
        if forward <= -backward {
            Some(forward)
        } else {
            Some(backward)
        }
    }

    /// Returns the minimum value of an interval.
    pub fn min(&self) -> f64 {
        self.start
    }

    /// Returns the maximum value of an interval.
    pub fn max(&self) -> f64 {
        self.end
    }
}
