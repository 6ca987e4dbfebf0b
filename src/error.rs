//! Error types for the lip-sync generator.
//!
//! The viseme extractor itself is infallible; every variant here belongs to
//! the layer around it (audio containers, synthesis, persistence).

/// Top-level error type for lip-sync generation.
#[derive(Debug, thiserror::Error)]
pub enum LipSyncError {
    /// WAV container probing or encoding error.
    #[error("audio error: {0}")]
    Audio(String),

    /// Text-to-speech synthesis error.
    #[error("TTS error: {0}")]
    Tts(String),

    /// The request could not be served as given (e.g. empty text).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// JSON encoding error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, LipSyncError>;
