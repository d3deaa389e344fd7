use thiserror::Error;

use crate::Column;

/// Errors reported by fallible point-store operations.
///
/// Degenerate numeric input (too few points, zero spread in `x`, zero correlation
/// denominators) is never an error: the engines return well-defined zeroed results
/// for those. Only domain violations, failed allocations and, with the `std`
/// feature, file I/O surface here.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// A logarithm was requested over a column holding a non-positive (or NaN) value.
    ///
    /// The store is left exactly as it was before the call.
    #[error("cannot take the logarithm of {value} (column {column:?}, point {index})")]
    LogDomain {
        /// Column the transform targeted
        column: Column,
        /// Position of the first offending point
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Backing storage could not grow; existing points are untouched.
    #[error("failed to grow point storage to {requested} points")]
    Allocation {
        /// Capacity that was requested
        requested: usize,
    },

    /// The data file could not be read or written.
    #[cfg(feature = "std")]
    #[error("data file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for point-store operations
pub type Result<T> = core::result::Result<T, DatasetError>;
