pub(crate) mod average;
pub(crate) mod builder;
pub(crate) mod rate;
pub(crate) mod rollup;
pub(crate) mod steps;

use crate::time::Duration;

/// Grid spacing used when a query does not specify one.
pub const DEFAULT_STEP_SIZE: Duration = Duration::millis(300);

/// Maximum gap between samples that is still trusted as continuously
/// valid.
///
/// A reporting gap at least this long counts as missing data even if a
/// value is eventually observed.
pub const HEARTBEAT: Duration = Duration::millis(600_000);

/// Cross fill factor: the largest fraction of a bucket's span that may be
/// unknown while the bucket is still reported with a value.
pub const XFF: f64 = 0.5;
