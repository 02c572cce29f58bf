use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or exporting a tree.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller error detected before growth begins (e.g. an empty leaf set).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// I/O error (frame directory creation, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding/saving error from the frame sink.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
