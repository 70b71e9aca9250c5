//! Error types for trace capture and rendering
//!
//! Two failure modes exist: an element kind with no entry in the
//! abbreviation table (fatal for that formatting attempt) and a trace
//! index outside the recorded range. Both propagate unmodified to the
//! immediate caller; nothing is retried or silently recovered. Failures
//! raised by the intercepted operation itself are host-owned and never
//! pass through this type.

use thiserror::Error;

use crate::dtype::Dtype;

/// Error type for tracing operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RastroError {
    /// A value claims an element kind absent from the abbreviation table
    #[error("no abbreviation for dtype {dtype}: extend the DtypeAbbrevs table to cover it")]
    UnsupportedDtype {
        /// Element kind missing from the table
        dtype: Dtype,
    },

    /// Trace index outside the recorded range
    #[error("trace index {index} out of range: store holds {len} traces")]
    TraceIndexOutOfRange {
        /// Requested index (negative values count from the end)
        index: isize,
        /// Number of recorded traces
        len: usize,
    },
}

/// Result type alias for tracing operations
pub type Result<T> = std::result::Result<T, RastroError>;
