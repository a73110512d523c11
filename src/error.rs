//! This module defines the single, unified error type for the entire planepack
//! library. It uses the `thiserror` crate to provide ergonomic, context-aware
//! error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanepackError {
    // =========================================================================
    // === Configuration Errors (rejected before any encoding begins)
    // =========================================================================
    #[error("Invalid plane count {0}. Must be 1 or more.")]
    InvalidPlaneCount(usize),

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    /// An I/O failure tied to a specific file, reported with the offending path.
    #[error("I/O error on \"{path}\": {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An error from the Serde JSON library, used when logging the effective config.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    // =========================================================================
    // === Low-Level Kernel Errors
    // =========================================================================
    #[error("Buffer length mismatch: expected a multiple of {0}, got {1}")]
    BufferMismatch(usize, usize),

    #[error("RLE decoding error: {0}")]
    Decode(String),

    #[error("Internal logic error (this is a bug): {0}")]
    Internal(String),
}
