use crate::Timestamp;

/// Error type
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A zero step size was passed to an aggregation.
    ZeroStep,

    /// The end of a query range lies before its start.
    InvalidRange {
        /// Start of the offending range.
        start: Timestamp,
        /// End of the offending range.
        end: Timestamp,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroStep => {
                write!(f, "ZeroStep")
            }
            Self::InvalidRange { start, end } => {
                write!(f, "InvalidRange({start:?}..{end:?})")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
