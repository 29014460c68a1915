//! Error types for the multipart codec.

use thiserror::Error;

/// The main error type for the multipart codec.
#[derive(Error, Debug)]
pub enum Error {
    /// Boundary is empty or longer than 70 bytes
    #[error("boundary length should be from 1 to 70, got {0}")]
    BoundaryLength(usize),

    /// Boundary contains the configured line terminator
    #[error("boundary should not contain the line terminator")]
    BoundaryContainsLineTerminator,

    /// Boundary ends with a whitespace character
    #[error("boundary should not end with whitespace")]
    BoundaryEndsWithWhitespace,

    /// More than one trailer found while strict checking is on
    #[error("multipart must contain exactly one trailer, found {0}")]
    TrailerCount(usize),

    /// Codec configuration cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Text could not be converted to or from bytes
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The OS random source failed
    #[error("Random source error: {0}")]
    Random(#[from] getrandom::Error),
}

impl Error {
    /// Reports whether the error was caused by a bad argument to `encode`/`decode`
    /// (an invalid boundary or a buffer with too many trailers).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::BoundaryLength(_)
                | Error::BoundaryContainsLineTerminator
                | Error::BoundaryEndsWithWhitespace
                | Error::TrailerCount(_)
        )
    }
}

/// Specialized Result type for multipart operations.
pub type Result<T> = std::result::Result<T, Error>;
