use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// An instant, counted in milliseconds since the Unix epoch.
///
/// Grid alignment is always measured from the epoch, so two timestamps
/// aligned to the same step land on the same grid no matter which query
/// produced them.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, std::hash::Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the epoch.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the epoch.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Whole seconds since the epoch, truncating.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0 / 1_000
    }

    /// Elapsed time since `earlier`, or an empty span if `earlier` lies
    /// after `self`.
    #[must_use]
    pub const fn saturating_since(self, earlier: Self) -> Duration {
        if self.0 >= earlier.0 {
            Duration(self.0 - earlier.0)
        } else {
            Duration(0)
        }
    }

    /// Aligns to a multiple of `step`, rounding toward negative infinity.
    ///
    /// An already aligned timestamp is its own floor. `step` must be
    /// non-zero.
    #[must_use]
    pub const fn step_floor(self, step: Duration) -> Self {
        Self(self.0 / step.0 * step.0)
    }

    /// Aligns to a multiple of `step`, rounding toward positive infinity.
    ///
    /// An already aligned timestamp is its own ceiling. `step` must be
    /// non-zero.
    #[must_use]
    pub const fn step_ceiling(self, step: Duration) -> Self {
        let remainder = self.0 % step.0;

        if remainder == 0 {
            self
        } else {
            Self(self.0 - remainder + step.0)
        }
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign<Duration> for Timestamp {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub<Duration> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Duration;

    // `rhs` must not lie after `self`
    fn sub(self, rhs: Self) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

/// A non-negative span of time, counted in milliseconds.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, std::hash::Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Duration(u64);

impl Duration {
    /// Formats N milliseconds as a span.
    #[must_use]
    pub const fn millis(n: u64) -> Self {
        Self(n)
    }

    /// Formats N seconds as a span.
    #[must_use]
    pub const fn seconds(n: u64) -> Self {
        Self::millis(n * 1_000)
    }

    /// Formats N minutes as a span.
    #[must_use]
    pub const fn minutes(n: u64) -> Self {
        Self::seconds(n * 60)
    }

    /// Formats N hours as a span.
    #[must_use]
    pub const fn hours(n: u64) -> Self {
        Self::minutes(n * 60)
    }

    /// Formats N days as a span.
    #[must_use]
    pub const fn days(n: u64) -> Self {
        Self::hours(n * 24)
    }

    /// Number of milliseconds in the span.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Number of whole seconds in the span, truncating.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0 / 1_000
    }

    /// Whether the span is empty.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

/// Returns the current timestamp.
#[must_use]
pub fn timestamp() -> Timestamp {
    let start = SystemTime::now();
    let since_the_epoch = start
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards");

    #[allow(clippy::cast_possible_truncation)]
    Timestamp(since_the_epoch.as_millis() as u64)
}
