//! An embeddable time series resampling and aggregation engine.
//!
//! Raw, irregularly timed measurement samples are re-expressed as regularly
//! spaced, analysis-ready point sequences: rates of change, interval-weighted
//! averages and step-aligned rollups.
//!
//! The engine is a pure function over an already ordered sample stream.
//! Storage, indexing and transport are left to the surrounding application;
//! every transform is local, synchronous state that is constructed fresh per
//! call, so concurrent queries need no locks as long as each builds its own.
//!
//! Data points are f32s by default, but can be switched to f64 using the
//! `high_precision` feature flag.
//!
//! ```
//! use restep::{Duration, MetricValue, Point, Resample, Timestamp};
//!
//! let points = [
//!     Point::new(Timestamp::from_millis(0), Some(MetricValue::Gauge(10.0))),
//!     Point::new(Timestamp::from_millis(300), Some(MetricValue::Gauge(20.0))),
//!     Point::new(Timestamp::from_millis(600), Some(MetricValue::Gauge(30.0))),
//! ];
//!
//! let averaged = Resample::range(Timestamp::from_millis(0), Timestamp::from_millis(600))
//!     .step(Duration::millis(300))
//!     .average(points)?;
//!
//! println!("{averaged:#?}");
//!
//! # Ok::<(), restep::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

mod agg;
mod error;
mod point;
mod time;
mod value;

pub use agg::average::average;
pub use agg::builder::Resample;
pub use agg::rate::Rate;
pub use agg::rollup::rollup;
pub use agg::steps::Steps;
pub use agg::{DEFAULT_STEP_SIZE, HEARTBEAT, XFF};
pub use error::{Error, Result};
pub use point::Point;
pub use time::{timestamp, Duration, Timestamp};
pub use value::MetricValue;

/// Value used in time series
#[cfg(feature = "high_precision")]
pub type Value = f64;

/// Value used in time series
#[cfg(not(feature = "high_precision"))]
pub type Value = f32;
