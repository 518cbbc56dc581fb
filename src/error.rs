//! Error types for orbital-state computation and its collaborators

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// Newton-Raphson on Kepler's equation ran out of iterations
    #[error(
        "eccentric anomaly failed to converge after {iterations} iterations \
         (e = {eccentricity}, M = {mean_anomaly}, last step {last_delta:e}); \
         eccentricity probably too high"
    )]
    Convergence {
        eccentricity: f64,
        mean_anomaly: f64,
        iterations: usize,
        last_delta: f64,
    },

    /// Two bodies share a position, the force law is undefined
    #[error("bodies '{first}' and '{second}' coincide; gravitational force is undefined")]
    DegenerateGeometry { first: String, second: String },

    /// Orbital elements outside the supported domain
    #[error("invalid orbital elements: {0}")]
    InvalidElements(String),

    /// Body record that cannot enter the simulation
    #[error("invalid body '{name}': {reason}")]
    InvalidBody { name: String, reason: String },

    /// Caller-supplied argument rejected
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Date string could not be parsed
    #[error("date formatted incorrectly: '{0}' (expected MM/DD/YYYY)")]
    DateFormat(String),

    /// Reference data does not contain the requested epoch
    #[error("no reference data for {0}")]
    MissingEpoch(String),

    /// File I/O failure with path context
    #[error("file I/O error on {path:?}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O failure on a stream without a path
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrap a std::io::Error with the path it occurred on
pub fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> Error {
    Error::File {
        path: path.into(),
        source: err,
    }
}
