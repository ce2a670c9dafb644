use thiserror::Error;

/// Errors raised when a selection cannot be started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectError {
    #[error("seed ({x}, {y}) is outside the {width}x{height} image")]
    SeedOutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        expected: usize,
        actual: usize,
        width: usize,
        height: usize,
    },

    #[error("a {width}x{height} image does not fit in memory")]
    ImageTooLarge { width: usize, height: usize },

    #[error("unsupported channel count {0} (expected 1, 3, or 4)")]
    UnsupportedChannels(usize),
}

pub type Result<T> = std::result::Result<T, SelectError>;

#[cfg(feature = "python")]
impl From<SelectError> for pyo3::PyErr {
    fn from(err: SelectError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
