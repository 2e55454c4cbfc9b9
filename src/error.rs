//! Error types shared by every pipeline stage and the I/O helpers.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DehazeError>;

/// Failures reported by the dehazing pipeline and its collaborators.
#[derive(Error, Debug)]
pub enum DehazeError {
    /// Input image missing, unreadable or not decodable. Raised before any
    /// pipeline stage runs.
    #[error("unreadable input {}: {reason}", path.display())]
    UnreadableInput { path: PathBuf, reason: String },

    /// The image has no pixels.
    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    /// A raw sample buffer does not match the declared dimensions.
    #[error("buffer holds {actual} samples, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Two grids that must share H×W do not.
    #[error("shape mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A configuration value outside its valid domain.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Encoding or file-system failure while persisting results.
    #[error("failed to write {}: {reason}", path.display())]
    Output { path: PathBuf, reason: String },

    /// JSON configuration could not be read or parsed.
    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl DehazeError {
    pub(crate) fn invalid(
        name: &'static str,
        value: impl std::fmt::Display,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::UnreadableInput {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Output {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
