use crate::{
    error::Error,
    point::Point,
    time::{Duration, Timestamp},
    value::MetricValue,
    Value,
};

/// Rolls an ordered point sequence up onto a fixed grid, gauge style.
///
/// Values are folded bucket by bucket, weighted by how long they held;
/// time with no usable observation is tracked separately per bucket, and a
/// bucket whose unusable time reaches `heartbeat` is emitted as NaN rather
/// than with a made-up value.
///
/// Unlike [`average`](crate::average), an input gap spanning
/// several grid steps closes out every one of those steps explicitly, each
/// carrying the same aggregate that preceded the gap; the two transforms
/// deliberately do not produce grids of identical length for sparse input.
/// No output is produced for the trailing partial bucket after the last
/// input point.
///
/// The input must be ascending by timestamp; the engine does not sort.
///
/// # Errors
///
/// Returns an error if `step` is zero, or if `end` lies before `start`.
pub fn rollup(
    start: Timestamp,
    end: Timestamp,
    step: Duration,
    heartbeat: Duration,
    points: impl IntoIterator<Item = Point>,
) -> crate::Result<Vec<Point>> {
    if step.is_zero() {
        return Err(Error::ZeroStep);
    }
    if end < start {
        return Err(Error::InvalidRange { start, end });
    }

    log::debug!("rolling up [{start:?}..{end:?}] at step {step:?}, heartbeat {heartbeat:?}");

    Ok(Bucketizer::new(start, step, heartbeat).rollup(points))
}

/// Single-traversal accumulator state behind [`rollup`].
struct Bucketizer {
    step: Duration,
    heartbeat: Duration,

    last_update_time: Timestamp,
    last_value: Value,
    accum: Value,
    nan_millis: u64,
}

impl Bucketizer {
    fn new(start: Timestamp, step: Duration, heartbeat: Duration) -> Self {
        Self {
            step,
            heartbeat,
            last_update_time: start,
            last_value: Value::NAN,
            accum: 0.0,
            // The offset of `start` within its bucket was never observed
            nan_millis: (start - start.step_floor(step)).as_millis(),
        }
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn rollup(mut self, points: impl IntoIterator<Item = Point>) -> Vec<Point> {
        let mut results = Vec::new();

        for point in points {
            let old_time = self.last_update_time;
            let start_time = old_time.step_floor(self.step);
            let end_time = start_time + self.step;

            let new_value = point.y.map_or(Value::NAN, MetricValue::to_float);
            let update_value =
                Self::calculate_update(self.last_value, new_value, old_time, point.x);

            self.last_value = update_value;

            if point.x < end_time {
                // Still inside the current bucket
                self.accumulate(old_time, point.x, update_value);
            } else {
                let boundary_time = point.x.step_floor(self.step);

                // Fold the stretch up to the boundary, then close out every
                // step the stretch subsumes with the same aggregate
                self.accumulate(old_time, boundary_time, update_value);

                let valid_millis = (boundary_time - start_time).as_millis() as i64
                    - self.nan_millis as i64;

                let total_value =
                    if self.nan_millis < self.heartbeat.as_millis() && valid_millis > 0 {
                        self.accum / valid_millis as Value
                    } else {
                        Value::NAN
                    };

                let num_steps =
                    (boundary_time - end_time).as_millis() / self.step.as_millis() + 1;

                log::trace!("closing {num_steps} step(s) up to {boundary_time:?}");

                let mut next_time = end_time;

                for _ in 0..num_steps {
                    results.push(Point::new(next_time, Some(MetricValue::Gauge(total_value))));
                    next_time += self.step;
                }

                self.nan_millis = 0;
                self.accum = 0.0;

                self.accumulate(boundary_time, point.x, update_value);
            }

            self.last_update_time = point.x;
        }

        results
    }

    #[allow(clippy::cast_precision_loss)]
    fn accumulate(&mut self, old_time: Timestamp, new_time: Timestamp, update_value: Value) {
        let elapsed = new_time - old_time;

        if update_value.is_nan() {
            self.nan_millis += elapsed.as_millis();
        } else {
            self.accum += update_value * elapsed.as_millis() as Value;
        }
    }

    // For gauges the update is the new reading as-is; other value kinds
    // would hook their fold in here
    fn calculate_update(
        _old_value: Value,
        new_value: Value,
        _old_time: Timestamp,
        _new_time: Timestamp,
    ) -> Value {
        new_value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ts(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn gauge(x: u64, value: Value) -> Point {
        Point::new(ts(x), Some(MetricValue::Gauge(value)))
    }

    #[test_log::test]
    fn multi_step_gap_fills_every_step() -> crate::Result<()> {
        let results = rollup(
            ts(0),
            ts(1_200),
            Duration::millis(300),
            Duration::millis(600),
            [gauge(0, 5.0), gauge(1_200, 5.0)],
        )?;

        assert_eq!(
            vec![
                gauge(300, 5.0),
                gauge(600, 5.0),
                gauge(900, 5.0),
                gauge(1_200, 5.0),
            ],
            results,
        );

        Ok(())
    }

    #[test_log::test]
    fn nan_time_reaching_the_heartbeat_yields_nan() -> crate::Result<()> {
        // The stretch between 0 and the start at 100 was never observed
        let results = rollup(
            ts(100),
            ts(600),
            Duration::millis(300),
            Duration::millis(50),
            [gauge(400, 5.0)],
        )?;

        assert_eq!(1, results.len());

        let point = results.first().unwrap();
        assert_eq!(ts(300), point.x);

        let Some(MetricValue::Gauge(value)) = point.y else {
            panic!("expected a gauge value");
        };
        assert!(value.is_nan());

        Ok(())
    }

    #[test_log::test]
    fn nan_time_below_the_heartbeat_keeps_the_valid_part() -> crate::Result<()> {
        let points = [Point::new(ts(150), None), gauge(300, 4.0)];

        let results = rollup(
            ts(0),
            ts(300),
            Duration::millis(300),
            Duration::millis(600),
            points,
        )?;

        // Half the bucket is unobserved, the other half held 4.0
        assert_eq!(vec![gauge(300, 4.0)], results);

        Ok(())
    }

    #[test_log::test]
    fn trailing_partial_bucket_is_dropped() -> crate::Result<()> {
        let results = rollup(
            ts(0),
            ts(600),
            Duration::millis(300),
            Duration::millis(600),
            [gauge(100, 1.0), gauge(200, 2.0)],
        )?;

        assert_eq!(Vec::<Point>::new(), results);

        Ok(())
    }

    #[test_log::test]
    fn mixed_values_are_weighted_by_their_hold_time() -> crate::Result<()> {
        // 2.0 holds for [0, 100), 8.0 for [100, 300)
        let points = [gauge(0, 2.0), gauge(100, 2.0), gauge(300, 8.0)];

        let results = rollup(
            ts(0),
            ts(300),
            Duration::millis(300),
            Duration::millis(600),
            points,
        )?;

        assert_eq!(vec![gauge(300, 6.0)], results);

        Ok(())
    }

    #[test_log::test]
    fn zero_step_is_rejected() {
        assert_eq!(
            Err(Error::ZeroStep),
            rollup(
                ts(0),
                ts(600),
                Duration::millis(0),
                Duration::millis(600),
                std::iter::empty(),
            ),
        );
    }

    #[test_log::test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            Err(Error::InvalidRange {
                start: ts(600),
                end: ts(0),
            }),
            rollup(
                ts(600),
                ts(0),
                Duration::millis(300),
                Duration::millis(600),
                std::iter::empty(),
            ),
        );
    }
}
