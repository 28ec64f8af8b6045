use crate::{time::Duration, Value};
use serde::{Deserialize, Serialize};

/// A measurement value.
///
/// The set of kinds is closed; every transform handles all of them through
/// the shared operation set below. No operation mutates an operand, each
/// returns a new value whose kind is determined by the operation's
/// semantics (a rate derived from a counter delta is a gauge, for
/// instance).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MetricValue {
    /// An absolute, instantaneous value.
    Gauge(Value),

    /// A monotonically reported running total.
    ///
    /// Deltas between counter readings absorb resets and wraparound, see
    /// [`MetricValue::delta`].
    Counter(u64),
}

impl MetricValue {
    /// Adds another value, preserving the receiver's kind.
    ///
    /// The operand is read numerically, so adding a counter to a gauge
    /// accumulates its reading as a plain number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn plus(self, other: Self) -> Self {
        match self {
            Self::Gauge(value) => Self::Gauge(value + other.to_float()),
            Self::Counter(count) => Self::Counter(count.wrapping_add(other.to_float() as u64)),
        }
    }

    /// The change since a previous reading.
    ///
    /// For gauges this is a plain difference. For counters the difference
    /// is reset-aware: a reading below its predecessor is corrected for a
    /// 32-bit wraparound when the predecessor fits in 32 bits, and for a
    /// 64-bit wraparound otherwise.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn delta(self, previous: Self) -> Self {
        match self {
            Self::Gauge(value) => Self::Gauge(value - previous.to_float()),
            Self::Counter(count) => {
                let previous = match previous {
                    Self::Counter(count) => count,
                    Self::Gauge(value) => value as u64,
                };

                if count >= previous {
                    Self::Counter(count - previous)
                } else if previous <= u64::from(u32::MAX) {
                    Self::Counter(count + (u64::from(u32::MAX) - previous) + 1)
                } else {
                    Self::Counter(count.wrapping_sub(previous))
                }
            }
        }
    }

    /// Scales by an elapsed span of time, preserving the receiver's kind.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn times(self, elapsed: Duration) -> Self {
        match self {
            Self::Gauge(value) => Self::Gauge(value * elapsed.as_millis() as Value),
            Self::Counter(count) => Self::Counter(count.wrapping_mul(elapsed.as_millis())),
        }
    }

    /// Divides by a scalar.
    ///
    /// A divided counter becomes a gauge: the quotient is no longer a
    /// running total.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn divide_by(self, divisor: Value) -> Self {
        match self {
            Self::Gauge(value) => Self::Gauge(value / divisor),
            Self::Counter(count) => Self::Gauge(count as Value / divisor),
        }
    }

    /// The value as a plain float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_float(self) -> Value {
        match self {
            Self::Gauge(value) => value,
            Self::Counter(count) => count as Value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn counter_delta_monotonic() {
        assert_eq!(
            MetricValue::Counter(50),
            MetricValue::Counter(150).delta(MetricValue::Counter(100)),
        );
    }

    #[test_log::test]
    fn counter_delta_32_bit_wrap() {
        // 6 increments left to the 32-bit limit, then 4 past it
        assert_eq!(
            MetricValue::Counter(10),
            MetricValue::Counter(4).delta(MetricValue::Counter(u64::from(u32::MAX) - 5)),
        );
    }

    #[test_log::test]
    fn counter_delta_64_bit_wrap() {
        assert_eq!(
            MetricValue::Counter(10),
            MetricValue::Counter(5).delta(MetricValue::Counter(u64::MAX - 4)),
        );
    }

    #[test_log::test]
    fn divided_counter_is_a_gauge() {
        assert_eq!(
            MetricValue::Gauge(5.0),
            MetricValue::Counter(10).divide_by(2.0),
        );
    }

    #[test_log::test]
    fn gauge_arithmetic() {
        assert_eq!(
            MetricValue::Gauge(5.0),
            MetricValue::Gauge(2.0).plus(MetricValue::Gauge(3.0)),
        );
        assert_eq!(
            MetricValue::Gauge(-2.0),
            MetricValue::Gauge(3.0).delta(MetricValue::Gauge(5.0)),
        );
        assert_eq!(
            MetricValue::Gauge(200.0),
            MetricValue::Gauge(2.0).times(Duration::millis(100)),
        );
        assert_eq!(
            MetricValue::Gauge(2.5),
            MetricValue::Gauge(5.0).divide_by(2.0),
        );
    }

    #[test_log::test]
    fn to_float() {
        assert_eq!(42.0, MetricValue::Counter(42).to_float());
        assert_eq!(1.5, MetricValue::Gauge(1.5).to_float());
    }
}
