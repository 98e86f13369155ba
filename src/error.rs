//! Error kinds for the chunking engine.
//!
//! `ConfigError` is fatal at construction time: no partially-built engine
//! is ever returned to the caller. `EngineError` covers the two ways a run
//! can fail after construction: an IO failure reading the input stream, or
//! an internal invariant violation that should be unreachable in correct
//! code but is surfaced loudly rather than silently tolerated.

use thiserror::Error;

/// Raised while validating algorithm parameters or a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("missing required key `{key}` for algorithm `{algorithm}`")]
    MissingKey { algorithm: &'static str, key: &'static str },

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("unknown chunking algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown hashing algorithm: {0}")]
    UnknownHashingAlgorithm(String),

    #[error("unknown SIMD mode: {0}")]
    UnknownSimdMode(String),

    #[error(
        "SIMD window size {window} is not a positive even multiple of the {register}-byte register width"
    )]
    IncompatibleSimdWindow { window: usize, register: usize },

    #[error("{0} must satisfy min < avg < max (got min={1}, avg={2}, max={3})")]
    OutOfOrderBounds(&'static str, usize, usize, usize),

    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Raised while a run is in progress.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal invariant was violated, e.g. an algorithm returned a cut
    /// of zero or a cut past the buffered region. This should never happen
    /// in correct code; it names the offending algorithm and parameters so
    /// the bug can be traced rather than silently truncating output.
    #[error("invariant violation in {algorithm}: {message}")]
    InvariantViolation {
        algorithm: &'static str,
        message: String,
    },
}
