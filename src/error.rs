//! Shared error types for stub generation.

use thiserror::Error;

/// Main error type for stubforge operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A bijective-map lookup or removal on a key that participates in
    /// no pair.
    #[error("key {key} not found in bijective map")]
    KeyNotFound { key: String },

    /// A write attempt through a read-only field guard.
    #[error("attribute '{field}' of '{owner}' object is read-only")]
    ImmutableField { field: String, owner: String },

    /// A dump recorded more trailing defaults than the callable has
    /// parameters. Fatal to the generation call that encountered it;
    /// default matching cannot produce correct text past this point.
    #[error(
        "malformed signature metadata for '{member}': {defaults} default(s) recorded for {params} parameter(s)"
    )]
    MalformedSignatureMetadata {
        member: String,
        params: usize,
        defaults: usize,
    },

    /// Configuration errors (unreadable or invalid `stubforge.toml`).
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors from reflection-dump parsing
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors from configuration parsing
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Result type alias using our error type.
pub type Result<T> = std::result::Result<T, Error>;
