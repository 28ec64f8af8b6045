use super::{average::average, rollup::rollup, DEFAULT_STEP_SIZE, HEARTBEAT};
use crate::{
    point::Point,
    time::{Duration, Timestamp},
};

/// Configures a resampling run over a query range.
///
/// A `Resample` only holds configuration; all traversal state lives inside
/// the terminal operations, so one plan can drive any number of runs.
///
/// ```
/// use restep::{Duration, MetricValue, Point, Resample, Timestamp};
///
/// let points = [
///     Point::new(Timestamp::from_millis(0), Some(MetricValue::Gauge(10.0))),
///     Point::new(Timestamp::from_millis(450), Some(MetricValue::Gauge(20.0))),
///     Point::new(Timestamp::from_millis(600), Some(MetricValue::Gauge(30.0))),
/// ];
///
/// let rolled = Resample::range(Timestamp::from_millis(0), Timestamp::from_millis(600))
///     .step(Duration::millis(300))
///     .heartbeat(Duration::minutes(5))
///     .rollup(points)?;
///
/// println!("{rolled:#?}");
///
/// # Ok::<(), restep::Error>(())
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Resample {
    start: Timestamp,
    end: Timestamp,
    step: Duration,
    heartbeat: Duration,
}

impl Resample {
    /// Creates a resampling plan for the given query range.
    ///
    /// Defaults to [`DEFAULT_STEP_SIZE`] and [`HEARTBEAT`].
    #[must_use]
    pub fn range(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start,
            end,
            step: DEFAULT_STEP_SIZE,
            heartbeat: HEARTBEAT,
        }
    }

    /// Sets the grid spacing of the output.
    #[must_use]
    pub fn step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Sets the staleness bound used by [`Resample::rollup`].
    ///
    /// [`Resample::average`] always gates on the fixed [`HEARTBEAT`].
    #[must_use]
    pub fn heartbeat(mut self, heartbeat: Duration) -> Self {
        self.heartbeat = heartbeat;
        self
    }

    /// Runs the interval-weighted averager over `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is zero or the range is inverted.
    pub fn average(&self, points: impl IntoIterator<Item = Point>) -> crate::Result<Vec<Point>> {
        average(self.start, self.end, self.step, points)
    }

    /// Runs the gauge rollup over `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is zero or the range is inverted.
    pub fn rollup(&self, points: impl IntoIterator<Item = Point>) -> crate::Result<Vec<Point>> {
        rollup(self.start, self.end, self.step, self.heartbeat, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MetricValue, Value};

    fn ts(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn gauge(x: u64, value: Value) -> Point {
        Point::new(ts(x), Some(MetricValue::Gauge(value)))
    }

    #[test_log::test]
    fn plan_matches_direct_calls() -> crate::Result<()> {
        let points = [gauge(0, 10.0), gauge(300, 20.0), gauge(600, 30.0)];
        let plan = Resample::range(ts(0), ts(600)).step(Duration::millis(300));

        assert_eq!(
            average(ts(0), ts(600), Duration::millis(300), points)?,
            plan.average(points)?,
        );
        assert_eq!(
            rollup(
                ts(0),
                ts(600),
                Duration::millis(300),
                HEARTBEAT,
                points,
            )?,
            plan.rollup(points)?,
        );

        Ok(())
    }

    #[test_log::test]
    fn default_step_is_applied() -> crate::Result<()> {
        let points = [gauge(0, 10.0), gauge(300, 20.0)];

        let results = Resample::range(ts(0), ts(300)).average(points)?;

        assert_eq!(
            average(ts(0), ts(300), DEFAULT_STEP_SIZE, points)?,
            results,
        );

        Ok(())
    }
}
