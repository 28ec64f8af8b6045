use crate::time::{Duration, Timestamp};

/// The lazy, finite sequence of grid-aligned timestamps covering a query
/// range.
///
/// Yields `t0, t0 + step, ..., tn` where `t0` is the range start aligned
/// upwards and `tn` the range end aligned upwards, inclusive. Each instance
/// is single use; aggregations construct a fresh one per call and drive it
/// to exhaustion at most once.
pub struct Steps {
    current: Timestamp,
    last: Timestamp,
    step: Duration,
}

impl Steps {
    /// Creates the step sequence for the given range.
    ///
    /// `step` must be non-zero.
    #[must_use]
    pub fn new(start: Timestamp, end: Timestamp, step: Duration) -> Self {
        Self {
            current: start.step_ceiling(step),
            last: end.step_ceiling(step),
            step,
        }
    }
}

impl Iterator for Steps {
    type Item = Timestamp;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current > self.last {
            return None;
        }

        let ts = self.current;
        self.current = ts + self.step;

        Some(ts)
    }
}
