//! Error types for the inspection and program-generation stages.
//!
//! "Nothing found" outcomes (no sheet, no contour, no lines, unknown staging
//! id) are never errors; they surface as `Option`s or empty results. The
//! variants below are reserved for input the core cannot work with.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the core.
#[derive(Error, Debug)]
pub enum Error {
    /// The image buffer cannot be interpreted.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Image codec failure while reading or writing an encoded image.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Bend matching was asked to pick from an empty bend list.
    #[error("no bend points detected")]
    NoBendPoints,

    /// Program synthesis was called without any scan entries.
    #[error("scan list is empty")]
    EmptyScanList,

    /// A scan entry carries values the machine cannot execute.
    #[error("scan entry {index} is malformed: {reason}")]
    MalformedScan { index: usize, reason: String },

    /// None of the requested target angles resolved to process parameters.
    #[error("no scan parameters found for any target angle")]
    NoParameters,

    /// A request payload or numeric argument failed strict parsing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure with the offending path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
