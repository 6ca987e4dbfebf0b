//! Configuration types for lip-sync generation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{LipSyncError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LipSyncConfig {
    /// Viseme extractor settings.
    pub extractor: ExtractorConfig,
    /// Voice requested from the speech synthesizer.
    pub voice: VoiceConfig,
    /// Where generated artifacts are written.
    pub output: OutputConfig,
}

/// Viseme extractor configuration.
///
/// The 44-byte container header is fixed and not configurable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Output cue rate in frames per second.
    pub frame_rate: u32,
    /// Sample rate of the incoming LINEAR16 audio in Hz.
    pub sample_rate: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            frame_rate: 24,
            sample_rate: 24_000,
        }
    }
}

/// Voice gender hint forwarded to the synthesizer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    #[default]
    Female,
    Male,
    Neutral,
}

/// Voice selection passed to the speech synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// BCP-47 language code, e.g. `en-US`.
    pub language_code: String,
    /// Preferred voice gender.
    pub gender: VoiceGender,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_owned(),
            gender: VoiceGender::Female,
        }
    }
}

/// Artifact output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Synthesized speech (WAV container).
    pub audio_path: PathBuf,
    /// Mouth cue track (JSON).
    pub cues_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            audio_path: PathBuf::from("public/audio/audio.wav"),
            cues_path: PathBuf::from("public/data/lipSync.json"),
        }
    }
}

impl LipSyncConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| LipSyncError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| LipSyncError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/fae-lipsync/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config)
                .join("fae-lipsync")
                .join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("fae-lipsync")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/fae-lipsync/config.toml")
        }
    }
}
