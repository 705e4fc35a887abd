//! Error types for the persistence boundary.
//!
//! Resolution itself has no fatal errors: lookup misses, malformed
//! gradients and unknown paths all degrade to defaults (logged via
//! `tracing`). The only fallible surface is the strict decode/encode of
//! persisted blobs.

use thiserror::Error;

/// Errors from strict persistence decode/encode.
#[derive(Debug, Error)]
pub enum AppearanceError {
    /// The stored blob is not valid JSON or matches neither persisted
    /// shape. The lenient path recovers from this by resetting to the
    /// fallback theme's defaults.
    #[error("malformed appearance blob: {0}")]
    MalformedBlob(#[from] serde_json::Error),

    /// The state could not be serialized back to a blob.
    #[error("appearance state could not be encoded: {0}")]
    Encode(serde_json::Error),
}
