//! Whole-track properties of the viseme extractor.

use fae_lipsync::viseme::{MouthShape, minimum_per_shape};
use fae_lipsync::{LipSyncTrack, extract_visemes};

use crate::helpers::{audio_with_frame_amplitudes, silence};

fn extract(bytes: &[u8]) -> LipSyncTrack {
    extract_visemes(bytes, 24, 24_000)
}

fn assert_gapless(track: &LipSyncTrack) {
    let cues = &track.mouth_cues;
    assert_eq!(cues[0].start, 0.0);
    for pair in cues.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    for cue in cues {
        assert!(cue.end > cue.start);
    }
}

/// Two-frame runs of each energy bucket: every shape occurs naturally.
fn stepped_speech(frames: usize) -> Vec<i16> {
    const LEVELS: [i16; 8] = [100, 100, 400, 400, 800, 800, 1_600, 1_600];
    (0..frames).map(|i| LEVELS[i % LEVELS.len()]).collect()
}

#[test]
fn cue_count_matches_duration() {
    for (seconds, expected) in [(0.5, 12), (1.0, 24), (2.5, 60), (1.01, 25)] {
        let track = extract(&silence(seconds));
        assert_eq!(track.len(), expected, "{seconds}s");
    }
}

#[test]
fn header_only_or_shorter_yields_empty_track() {
    let header_only = silence(0.0);
    assert_eq!(header_only.len(), 44);
    assert!(extract(&header_only).is_empty());
    assert!(extract(&header_only[..20]).is_empty());
    assert!(extract(&[]).is_empty());
}

#[test]
fn silence_is_closed_throughout() {
    let track = extract(&silence(1.0));
    assert_eq!(track.len(), 24);
    assert!(track.mouth_cues.iter().all(|c| c.value == MouthShape::Closed));
}

#[test]
fn tracks_are_gapless_and_start_at_zero() {
    for frames in [3, 24, 57, 120] {
        let track = extract(&audio_with_frame_amplitudes(&stepped_speech(frames)));
        assert_eq!(track.len(), frames);
        assert_gapless(&track);
    }
}

#[test]
fn first_and_last_cues_are_closed() {
    let mut amplitudes = stepped_speech(48);
    amplitudes[0] = 12_000;
    amplitudes[47] = 12_000;
    let track = extract(&audio_with_frame_amplitudes(&amplitudes));
    assert_eq!(track.mouth_cues[0].value, MouthShape::Closed);
    assert_eq!(track.mouth_cues[47].value, MouthShape::Closed);
}

#[test]
fn natural_distribution_meets_minimum() {
    let track = extract(&audio_with_frame_amplitudes(&stepped_speech(120)));
    let counts = track.counts();
    let minimum = minimum_per_shape(120);
    assert_eq!(minimum, 6);
    assert_eq!(counts.open, 30);
    assert_eq!(counts.half_open, 30);
    // The last frame was wide before boundary pinning.
    assert_eq!(counts.wide, 29);
}

#[test]
fn missing_shape_is_topped_up() {
    // Five seconds: silence around a loud block. The quiet frames sit below
    // the 75th percentile and classify open; nothing is half-open.
    let mut amplitudes = vec![0i16; 120];
    for a in &mut amplitudes[40..80] {
        *a = 5_000;
    }
    let track = extract(&audio_with_frame_amplitudes(&amplitudes));
    let counts = track.counts();
    let minimum = minimum_per_shape(120);
    for shape in MouthShape::EXPRESSIVE {
        assert!(
            counts.get(shape) >= minimum,
            "{shape:?} has {} < {minimum}",
            counts.get(shape)
        );
    }
    assert_eq!(counts.half_open, minimum);
    assert_eq!(track.mouth_cues[5].value, MouthShape::HalfOpen);
}

#[test]
fn extraction_is_deterministic() {
    let amplitudes: Vec<i16> = (0..96).map(|i| ((i * 7_919) % 9_000) as i16).collect();
    let bytes = audio_with_frame_amplitudes(&amplitudes);
    let first = extract(&bytes).to_json().unwrap();
    let second = extract(&bytes).to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn burst_between_distinct_shapes_is_wide() {
    let mut amplitudes: Vec<i16> = (0..24).map(|i| [100, 400, 800, 1_600][i % 4]).collect();
    amplitudes[10] = 6_000;
    amplitudes[11] = 800;
    let track = extract(&audio_with_frame_amplitudes(&amplitudes));
    assert_eq!(track.mouth_cues[10].value, MouthShape::Wide);
}

#[test]
fn burst_over_flat_background_is_wide() {
    let mut amplitudes = vec![1_000i16; 24];
    amplitudes[12] = 6_000;
    let track = extract(&audio_with_frame_amplitudes(&amplitudes));
    assert_eq!(track.len(), 24);
    assert_eq!(track.mouth_cues[12].value, MouthShape::Wide);
    assert_eq!(track.mouth_cues[0].value, MouthShape::Closed);
    assert_eq!(track.mouth_cues[23].value, MouthShape::Closed);
}

#[test]
fn constant_tone_is_closed_throughout() {
    let track = extract(&audio_with_frame_amplitudes(&[1_000; 24]));
    assert_eq!(track.counts().closed, 24);
}
