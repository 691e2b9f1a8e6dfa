//! Error types shared by all numerical routines of the crate.

use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Errors that can occur while evaluating Green's functions and transforms.
#[derive(Debug, Error)]
pub enum GfError {
    /// An input array was empty.
    #[error("Input '{0}' must not be empty")]
    EmptyInput(&'static str),

    /// Two inputs that have to match in size do not.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The imaginary time or frequency mesh is not usable.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A scalar parameter is outside of its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// LAPACK reported a failure.
    #[error("Linear algebra failure: {0}")]
    Linalg(#[from] LinalgError),

    /// An iterative method did not reach the requested accuracy.
    #[error("Not converged after {iterations} iterations: {reason}")]
    NotConverged { iterations: usize, reason: String },

    /// Root search could not find a sign change.
    #[error("Root is not bracketed in [{lower}, {upper}]")]
    NotBracketed { lower: f64, upper: f64 },

    /// Every Padé approximant was rejected.
    #[error("No valid Padé approximant for n in [{n_min}, {n_max}]")]
    NoValidApproximant { n_min: usize, n_max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse configuration: {0}")]
    ConfigRead(#[from] toml::de::Error),

    #[error("Could not serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Could not write npy file: {0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),
}

/// Result type used throughout the crate.
pub type GfResult<T> = Result<T, GfError>;
