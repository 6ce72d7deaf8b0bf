//! Error types for the fallible edges of the game
//!
//! The simulation itself never fails: losing a life or the game is a game
//! event, not an error. Configuration parsing, persistence and GPU setup can
//! fail; callers log and degrade where they can.

use thiserror::Error;

/// Errors raised while loading tuning or settings documents.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document was not valid JSON for the expected shape.
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but describes an unusable game.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors raised by a key-value storage backend.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// No storage is reachable (private browsing, missing window, ...).
    #[error("storage unavailable")]
    Unavailable,

    /// Filesystem failure in the native backend.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors raised while bringing up the GPU renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
