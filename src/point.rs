use crate::{value::MetricValue, Timestamp};
use serde::{Deserialize, Serialize};

/// A single sample, or a single aggregation result, on the time axis.
///
/// An absent value means "no observation reported", which is distinct from
/// a present but zero value. Point sequences fed into the engine are
/// expected to be ascending by timestamp and deduplicated; the engine does
/// not sort.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Position on the time axis.
    #[serde(rename = "timestamp")]
    pub x: Timestamp,

    /// The observed or computed value, if any.
    ///
    /// Omitted from the JSON representation when absent.
    #[serde(rename = "value", skip_serializing_if = "Option::is_none", default)]
    pub y: Option<MetricValue>,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: Timestamp, y: Option<MetricValue>) -> Self {
        Self { x, y }
    }
}
