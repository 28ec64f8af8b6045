use super::{steps::Steps, HEARTBEAT, XFF};
use crate::{
    error::Error,
    point::Point,
    time::{Duration, Timestamp},
    value::MetricValue,
    Value,
};

/// Resamples an ordered point sequence onto a fixed grid using
/// interval-weighted averaging.
///
/// One output point is produced per grid step between the aligned range
/// bounds, carrying the average of the values that covered the bucket,
/// weighted by how long each value held. A bucket is emitted without a
/// value once the unknown fraction of its span reaches [`XFF`]; time
/// between samples that is at least [`HEARTBEAT`] long counts as unknown
/// even if a value is eventually observed.
///
/// The traversal advances at most one grid boundary per input point, so a
/// sparse input whose points jump several steps at once skips the
/// boundaries in between; [`rollup`](crate::rollup) fills them
/// instead. The traversal also stops as soon as either the input or the
/// grid is exhausted, whichever happens first.
///
/// The input must be ascending by timestamp; the engine does not sort.
///
/// # Errors
///
/// Returns an error if `step` is zero, or if `end` lies before `start`.
pub fn average(
    start: Timestamp,
    end: Timestamp,
    step: Duration,
    points: impl IntoIterator<Item = Point>,
) -> crate::Result<Vec<Point>> {
    if step.is_zero() {
        return Err(Error::ZeroStep);
    }
    if end < start {
        return Err(Error::InvalidRange { start, end });
    }

    log::debug!("averaging [{start:?}..{end:?}] at step {step:?}");

    let mut steps = Steps::new(start, end, step);
    let mut results = Vec::new();

    // NOTE: Cannot be empty, the range was validated above
    let Some(mut next_step) = steps.next() else {
        return Ok(results);
    };

    let mut last_update = start;
    let mut accumulated = MetricValue::Gauge(0.0);

    // The stretch between `start` and the previous grid boundary was never
    // observed
    let mut unknown = start.as_millis() % step.as_millis();
    let mut known: u64 = 0;

    for point in points {
        if point.x < last_update {
            continue;
        }

        // Fold at most up to the next grid boundary; anything past it
        // belongs to the following bucket. A boundary left lagging behind
        // by a multi-step jump contributes no time.
        let interval = if point.x >= next_step {
            next_step.saturating_since(last_update)
        } else {
            point.x - last_update
        };

        match point.y {
            Some(value) if interval < HEARTBEAT => {
                known += interval.as_millis();
                accumulated = accumulated.plus(value.times(interval));
            }
            _ => unknown += interval.as_millis(),
        }

        if point.x >= next_step {
            let elapsed = known + unknown;

            #[allow(clippy::cast_precision_loss)]
            let value = if elapsed > 0 && (unknown as f64 / elapsed as f64) < XFF {
                Some(accumulated.divide_by(known as Value))
            } else {
                None
            };

            results.push(Point::new(next_step, value));

            // Seed the next bucket with the remainder past the boundary. A
            // present value covers the whole remainder without a heartbeat
            // check.
            let remainder = point.x - next_step;
            let mut unknown_carry = 0;

            if let Some(value) = point.y {
                known = remainder.as_millis();
                accumulated = MetricValue::Gauge(0.0).plus(value.times(remainder));
            } else {
                known = 0;
                accumulated = MetricValue::Gauge(0.0);
                unknown_carry = remainder.as_millis();
            }

            let Some(step_ts) = steps.next() else {
                break;
            };

            next_step = step_ts;
            unknown = unknown_carry;
        }

        last_update = point.x;
    }

    Ok(results)
}
