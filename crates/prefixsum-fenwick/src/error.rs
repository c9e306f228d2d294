use thiserror::Error;

/// Errors reported by [`PrefixSumIndex`](crate::PrefixSumIndex) and
/// [`OneBased`](crate::OneBased).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A negative length, or a range whose low bound exceeds its high bound.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A position outside the addressable elements.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: i64, len: usize },
}

impl IndexError {
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        IndexError::OutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len,
        }
    }

    pub(crate) fn inverted_range<L: std::fmt::Display>(low: L, high: L) -> Self {
        IndexError::InvalidArgument(format!("range low {low} exceeds high {high}"))
    }

    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            IndexError::InvalidArgument(_) => "invalid_argument",
            IndexError::OutOfRange { .. } => "out_of_range",
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, IndexError::OutOfRange { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, IndexError::InvalidArgument(_))
    }
}

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, IndexError>;
