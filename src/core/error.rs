// Error handling for the Power Twin pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TwinError>;

#[derive(Error, Debug)]
pub enum TwinError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV must have columns: time_s,power_w (missing: {})", missing.join(","))]
    MissingColumns { missing: Vec<String> },

    #[error("Invalid {column} value {value:?} on line {line}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Need at least 2 samples to integrate energy, got {found}")]
    InsufficientSamples { found: usize },

    #[error("Timestamps must be non-decreasing: interval {index} has dt = {dt}")]
    NonMonotonic { index: usize, dt: f64 },

    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("Unsupported compression type: {0}")]
    UnsupportedCompression(&'static str),
}

/// Coarse classification of [`TwinError`] used by callers deciding how to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Schema,
    Parse,
    InsufficientData,
    Ordering,
    Source,
}

impl TwinError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TwinError::MissingColumns { .. } => ErrorKind::Schema,
            TwinError::InvalidValue { .. } => ErrorKind::Parse,
            TwinError::InsufficientSamples { .. } => ErrorKind::InsufficientData,
            TwinError::NonMonotonic { .. } => ErrorKind::Ordering,
            TwinError::Io(_)
            | TwinError::Csv(_)
            | TwinError::DecompressionFailed(_)
            | TwinError::UnsupportedCompression(_) => ErrorKind::Source,
        }
    }

    /// True when the failure comes from the trace content rather than from reading it.
    pub fn is_input_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Source)
    }
}
