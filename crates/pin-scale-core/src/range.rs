//! Closed numeric intervals and the linear remap between them.

/// A closed interval `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    #[inline]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Width of the interval; zero for a degenerate range.
    #[inline]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }

    /// Pull `value` to the nearer bound when it lies outside the interval.
    ///
    /// Unlike `f64::clamp` this never panics on an inverted range, so callers
    /// that have not validated their bounds still get a value back.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.start {
            self.start
        } else if value > self.end {
            self.end
        } else {
            value
        }
    }
}

/// Linearly map `value` from `from` into `to`.
///
/// No bounds checking: values outside `from` extrapolate. A degenerate `from`
/// yields a non-finite result, so callers validate the source range first.
#[inline]
pub fn map_range(from: Range, to: Range, value: f64) -> f64 {
    to.start + (value - from.start) * to.span() / from.span()
}
