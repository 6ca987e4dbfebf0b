//! Text to lip-sync generation flow.
//!
//! Text → speech synthesizer → viseme extractor → audio + cue artifacts.
//! Nothing is written until synthesis, extraction and serialization have all
//! succeeded, so a failed request never leaves stale output looking fresh.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::artifacts::{ArtifactPaths, write_pair_atomic_async};
use crate::config::{LipSyncConfig, VoiceConfig};
use crate::error::{LipSyncError, Result};
use crate::tts::{SpeechSynthesizer, SynthesisRequest};
use crate::viseme::{LipSyncTrack, VisemeExtractor};
use crate::wav;

/// Outcome of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedLipSync {
    pub track: LipSyncTrack,
    pub paths: ArtifactPaths,
    /// Time spent in the extractor.
    pub elapsed: Duration,
}

/// Drives one synthesizer and one extractor, writing artifacts per request.
pub struct LipSyncPipeline<S> {
    synthesizer: S,
    extractor: VisemeExtractor,
    voice: VoiceConfig,
    paths: ArtifactPaths,
}

impl<S: SpeechSynthesizer> LipSyncPipeline<S> {
    pub fn new(config: &LipSyncConfig, synthesizer: S) -> Self {
        Self {
            synthesizer,
            extractor: VisemeExtractor::new(&config.extractor),
            voice: config.voice.clone(),
            paths: ArtifactPaths::from(&config.output),
        }
    }

    /// Override where artifacts are written.
    pub fn with_paths(mut self, paths: ArtifactPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Synthesize `text`, extract its mouth cues and persist both artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`LipSyncError::InvalidRequest`] for blank text, the
    /// synthesizer's error if synthesis fails, and an I/O or serialization
    /// error if the artifacts cannot be written.
    pub async fn generate(&self, text: &str) -> Result<GeneratedLipSync> {
        if text.trim().is_empty() {
            return Err(LipSyncError::InvalidRequest("text required".to_owned()));
        }

        let request = SynthesisRequest::new(text, &self.voice);
        info!(
            "synthesizing {} chars via {}",
            text.chars().count(),
            self.synthesizer.name()
        );
        let audio = self.synthesizer.synthesize(&request).await?;

        let sample_rate = self.extractor.config().sample_rate;
        match wav::probe_spec(&audio) {
            Ok(spec) if !wav::matches_expected_format(&spec, sample_rate) => {
                warn!(
                    "unexpected audio format from {}: {} ch, {} bit, {} Hz; cues may be off",
                    self.synthesizer.name(),
                    spec.channels,
                    spec.bits_per_sample,
                    spec.sample_rate
                );
            }
            Ok(_) => {}
            Err(e) => warn!("{e}; extracting from raw bytes anyway"),
        }

        let started = Instant::now();
        let track = self.extractor.extract(&audio);
        let elapsed = started.elapsed();
        info!("lip sync generation: {} cues in {elapsed:?}", track.len());

        let json = track.to_json()?;

        write_pair_atomic_async(self.paths.clone(), audio, json.into_bytes()).await?;
        info!(
            "wrote {} and {}",
            self.paths.audio.display(),
            self.paths.cues.display()
        );

        Ok(GeneratedLipSync {
            track,
            paths: self.paths.clone(),
            elapsed,
        })
    }
}
