//! Fae lip-sync: audio-driven mouth cues for avatar animation.
//!
//! This crate turns synthesized speech into a time-aligned track of mouth
//! shapes that a renderer replays against audio playback:
//! Text → TTS provider → LINEAR16 audio → viseme extractor → mouth cues
//!
//! # Architecture
//!
//! - **Viseme extractor** ([`viseme`]): a pure, synchronous pass over the
//!   waveform: frame energies, percentile thresholds, classification,
//!   contextual refinement and smoothing
//! - **TTS seam** ([`tts`]): the contract an external synthesizer fulfils
//! - **Pipeline** ([`pipeline`]): text in, audio and cue artifacts out
//! - **Artifacts** ([`artifacts`]): atomic persistence of both outputs

pub mod artifacts;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod tts;
pub mod viseme;
pub mod wav;

pub use config::LipSyncConfig;
pub use error::{LipSyncError, Result};
pub use pipeline::{GeneratedLipSync, LipSyncPipeline};
pub use tts::{SpeechSynthesizer, SynthesisRequest};
pub use viseme::{LipSyncTrack, MouthCue, MouthShape, VisemeExtractor, extract_visemes};
