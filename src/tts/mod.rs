//! Speech synthesis seam.
//!
//! Synthesis itself is provided by an external text-to-speech service. This
//! module only defines what the lip-sync pipeline needs from one: LINEAR16
//! audio (44-byte header, mono, 16-bit) for a piece of text.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::{VoiceConfig, VoiceGender};
use crate::error::{LipSyncError, Result};

/// A single synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub language_code: String,
    pub gender: VoiceGender,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice: &VoiceConfig) -> Self {
        Self {
            text: text.into(),
            language_code: voice.language_code.clone(),
            gender: voice.gender,
        }
    }
}

/// Text-to-speech provider contract.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Stable provider identifier used in logs.
    fn name(&self) -> &str;

    /// Synthesize `request` into a LINEAR16 WAV buffer.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>>;
}

/// Replays a pre-rendered WAV file for every request.
///
/// Useful offline and when the audio was produced by another tool.
#[derive(Debug, Clone)]
pub struct WavFileSynthesizer {
    path: PathBuf,
}

impl WavFileSynthesizer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SpeechSynthesizer for WavFileSynthesizer {
    fn name(&self) -> &str {
        "wav-file"
    }

    async fn synthesize(&self, _request: &SynthesisRequest) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| LipSyncError::Tts(format!("cannot read {}: {e}", self.path.display())))
    }
}
