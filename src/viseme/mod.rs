//! Audio-driven viseme extraction for lip-sync animation.
//!
//! A viseme is a visual mouth shape. This module turns a synthesized LINEAR16
//! waveform into a gapless, frame-aligned track of mouth cues that a 2D/3D
//! avatar renderer replays against audio playback time.
//!
//! The extractor is a strict sequence of whole-array passes:
//!
//! 1. frame segmentation and per-frame energy ([`frames`])
//! 2. percentile thresholds over the energy distribution ([`thresholds`])
//! 3. energy classification and neighbour-aware refinement ([`classify`])
//! 4. jitter smoothing, minimum shape distribution and boundary pinning
//!    ([`smoothing`])
//!
//! Energies and shapes are kept in separate arrays: every stage classifies
//! from the immutable energies and only rewrites shape labels.

mod classify;
mod frames;
mod smoothing;
mod thresholds;

pub use classify::{classify, refine_in_context};
pub use frames::{FrameLayout, HEADER_BYTES, frame_energies};
pub use smoothing::{
    ScanWindow, enforce_minimum_distribution, minimum_per_shape, pin_boundaries, place_shape,
    smooth_jitter,
};
pub use thresholds::Thresholds;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ExtractorConfig;

/// The four mouth shapes understood by the avatar renderer.
///
/// Serialized with the single-letter labels of the renderer's asset map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouthShape {
    /// Open mouth, medium energy.
    #[serde(rename = "A")]
    Open,
    /// Closed mouth, silence.
    #[serde(rename = "B")]
    Closed,
    /// Half-open mouth, low energy.
    #[serde(rename = "C")]
    HalfOpen,
    /// Wide/tense "EE" shape, high energy and plosive bursts.
    #[serde(rename = "D")]
    Wide,
}

impl MouthShape {
    /// Non-silence shapes, in the order minimum distribution is enforced.
    pub const EXPRESSIVE: [MouthShape; 3] =
        [MouthShape::Open, MouthShape::HalfOpen, MouthShape::Wide];

    /// Single-letter label used in the serialized track.
    pub fn label(self) -> &'static str {
        match self {
            MouthShape::Open => "A",
            MouthShape::Closed => "B",
            MouthShape::HalfOpen => "C",
            MouthShape::Wide => "D",
        }
    }

    /// Image asset the renderer shows for this shape.
    pub fn asset_name(self) -> &'static str {
        match self {
            MouthShape::Open => "Mouth_Open.png",
            MouthShape::Closed => "Mouth_Closed.png",
            MouthShape::HalfOpen => "Mouth_Half.png",
            MouthShape::Wide => "Mouth_Ee.png",
        }
    }
}

/// One timed mouth shape. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouthCue {
    pub start: f64,
    pub end: f64,
    pub value: MouthShape,
}

/// Occurrence count per mouth shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeCounts {
    pub open: usize,
    pub closed: usize,
    pub half_open: usize,
    pub wide: usize,
}

impl ShapeCounts {
    /// Tally a sequence of shapes.
    pub fn tally<'a>(shapes: impl IntoIterator<Item = &'a MouthShape>) -> Self {
        let mut counts = Self::default();
        for shape in shapes {
            *counts.get_mut(*shape) += 1;
        }
        counts
    }

    pub fn get(&self, shape: MouthShape) -> usize {
        match shape {
            MouthShape::Open => self.open,
            MouthShape::Closed => self.closed,
            MouthShape::HalfOpen => self.half_open,
            MouthShape::Wide => self.wide,
        }
    }

    fn get_mut(&mut self, shape: MouthShape) -> &mut usize {
        match shape {
            MouthShape::Open => &mut self.open,
            MouthShape::Closed => &mut self.closed,
            MouthShape::HalfOpen => &mut self.half_open,
            MouthShape::Wide => &mut self.wide,
        }
    }

    /// Total number of non-silence frames.
    pub fn expressive(&self) -> usize {
        self.open + self.half_open + self.wide
    }
}

/// The extractor output: one cue per frame, contiguous from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LipSyncTrack {
    pub mouth_cues: Vec<MouthCue>,
}

impl LipSyncTrack {
    pub fn len(&self) -> usize {
        self.mouth_cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mouth_cues.is_empty()
    }

    /// End time of the last cue, or zero for an empty track.
    pub fn duration(&self) -> f64 {
        self.mouth_cues.last().map_or(0.0, |cue| cue.end)
    }

    pub fn counts(&self) -> ShapeCounts {
        ShapeCounts::tally(self.mouth_cues.iter().map(|cue| &cue.value))
    }

    /// Cue active at `seconds` of playback, if any.
    pub fn cue_at(&self, seconds: f64) -> Option<&MouthCue> {
        if seconds < 0.0 {
            return None;
        }
        let idx = self.mouth_cues.partition_point(|cue| cue.end <= seconds);
        self.mouth_cues.get(idx)
    }

    /// Serialize as the `{"mouthCues": [...]}` document the renderer loads.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Config-driven front end for [`extract_visemes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VisemeExtractor {
    config: ExtractorConfig,
}

impl VisemeExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self { config: *config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run the extractor over a LINEAR16 container buffer.
    pub fn extract(&self, waveform: &[u8]) -> LipSyncTrack {
        extract_visemes(waveform, self.config.frame_rate, self.config.sample_rate)
    }
}

/// Convert a 44-byte-header, mono, 16-bit LINEAR16 buffer into mouth cues.
///
/// The buffer format is the caller's responsibility and is not validated.
/// Buffers too short to hold a single frame yield an empty track.
pub fn extract_visemes(waveform: &[u8], frame_rate: u32, sample_rate: u32) -> LipSyncTrack {
    let Some(layout) = FrameLayout::for_waveform(waveform.len(), frame_rate, sample_rate) else {
        debug!("buffer of {} bytes holds no audio frames", waveform.len());
        return LipSyncTrack::default();
    };
    debug!(
        "audio length {:.2}s, buffer size {} bytes, {} frames",
        layout.duration_secs(sample_rate),
        waveform.len(),
        layout.frame_count
    );

    let energies = frame_energies(waveform, &layout);
    let thresholds = Thresholds::from_energies(&energies);
    debug!(
        "energy thresholds: silence={}, low={}, medium={}, flat={}",
        thresholds.silence, thresholds.low, thresholds.medium, thresholds.flat
    );

    let mut shapes: Vec<MouthShape> = energies
        .iter()
        .map(|&e| classify(e, &thresholds))
        .collect();
    refine_in_context(&mut shapes, &energies);
    smooth_jitter(&mut shapes);

    let initial = ShapeCounts::tally(&shapes);
    debug!("initial mouth shape distribution: {initial:?}");
    // An utterance with no voiced frame has nothing to distribute.
    if initial.expressive() > 0 {
        enforce_minimum_distribution(&mut shapes, &initial);
    }
    pin_boundaries(&mut shapes);
    debug!(
        "final mouth shape distribution: {:?}",
        ShapeCounts::tally(&shapes)
    );

    let frame_duration = 1.0 / f64::from(frame_rate);
    let mouth_cues = shapes
        .into_iter()
        .enumerate()
        .map(|(i, value)| MouthCue {
            start: i as f64 * frame_duration,
            end: (i + 1) as f64 * frame_duration,
            value,
        })
        .collect();

    LipSyncTrack { mouth_cues }
}
