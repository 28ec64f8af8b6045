use crate::{point::Point, Value};

/// Maps an ordered point sequence to its rate of change.
///
/// The output has the same length as the input. The element at position 0
/// is a sentinel with an absent value (there is no predecessor to
/// difference against); callers discard it to obtain the `n - 1`
/// meaningful rates. Every later element carries
/// `delta(previous) / elapsed seconds` at the input's timestamp, so
/// counter reset and wraparound handling lives in
/// [`MetricValue::delta`](crate::MetricValue::delta), not here.
///
/// The input must be strictly increasing in time; two equal timestamps
/// divide by zero. An instance carries the previous point as private
/// state and must not be reused across sequences.
pub struct Rate<I> {
    inner: I,
    previous: Option<Point>,
}

impl<I> Rate<I> {
    /// Wraps an ordered point sequence.
    #[must_use]
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            previous: None,
        }
    }
}

impl<I: Iterator<Item = Point>> Iterator for Rate<I> {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.inner.next()?;

        let rate = self.previous.and_then(|previous| {
            let value = point.y?;
            let previous_value = previous.y?;

            // Truncating second difference
            #[allow(clippy::cast_precision_loss)]
            let elapsed = (point.x.as_secs() - previous.x.as_secs()) as Value;

            Some(value.delta(previous_value).divide_by(elapsed))
        });

        self.previous = Some(point);

        Some(Point::new(point.x, rate))
    }
}
