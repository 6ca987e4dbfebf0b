//! Pipeline: synthesizer output to persisted artifacts.

use async_trait::async_trait;
use fae_lipsync::artifacts::ArtifactPaths;
use fae_lipsync::tts::WavFileSynthesizer;
use fae_lipsync::{
    LipSyncConfig, LipSyncError, LipSyncPipeline, LipSyncTrack, MouthShape, SpeechSynthesizer,
    SynthesisRequest,
};

use crate::helpers::audio_with_frame_amplitudes;

struct FailingSynth;

#[async_trait]
impl SpeechSynthesizer for FailingSynth {
    fn name(&self) -> &str {
        "failing"
    }

    async fn synthesize(&self, _request: &SynthesisRequest) -> fae_lipsync::Result<Vec<u8>> {
        Err(LipSyncError::Tts("quota exceeded".to_owned()))
    }
}

fn paths_in(dir: &std::path::Path) -> ArtifactPaths {
    ArtifactPaths {
        audio: dir.join("audio").join("audio.wav"),
        cues: dir.join("data").join("lipSync.json"),
    }
}

#[tokio::test]
async fn wav_file_generation_writes_renderer_json() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("speech.wav");
    let amplitudes: Vec<i16> = (0..48).map(|i| [100, 400, 800, 1_600][i % 4]).collect();
    std::fs::write(&source, audio_with_frame_amplitudes(&amplitudes)).unwrap();

    let paths = paths_in(dir.path());
    let pipeline = LipSyncPipeline::new(&LipSyncConfig::default(), WavFileSynthesizer::new(&source))
        .with_paths(paths.clone());
    let generated = pipeline.generate("Hello world").await.unwrap();

    assert_eq!(generated.track.len(), 48);
    assert_eq!(generated.paths, paths);
    assert_eq!(
        std::fs::read(&paths.audio).unwrap(),
        std::fs::read(&source).unwrap()
    );

    let raw = std::fs::read_to_string(&paths.cues).unwrap();
    assert!(raw.starts_with(r#"{"mouthCues":[{"start":0.0,"#));
    let track: LipSyncTrack = serde_json::from_str(&raw).unwrap();
    assert_eq!(track, generated.track);
    assert_eq!(track.mouth_cues[0].value, MouthShape::Closed);
}

#[tokio::test]
async fn synthesis_failure_leaves_previous_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path());
    fae_lipsync::artifacts::write_atomic(&paths.audio, b"old audio").unwrap();
    fae_lipsync::artifacts::write_atomic(&paths.cues, b"old cues").unwrap();

    let pipeline =
        LipSyncPipeline::new(&LipSyncConfig::default(), FailingSynth).with_paths(paths.clone());
    let result = pipeline.generate("Hello").await;

    assert!(matches!(result, Err(LipSyncError::Tts(_))));
    assert_eq!(std::fs::read(&paths.audio).unwrap(), b"old audio");
    assert_eq!(std::fs::read(&paths.cues).unwrap(), b"old cues");
}

#[tokio::test]
async fn blank_text_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path());
    let pipeline =
        LipSyncPipeline::new(&LipSyncConfig::default(), FailingSynth).with_paths(paths.clone());

    let result = pipeline.generate("").await;
    assert!(matches!(result, Err(LipSyncError::InvalidRequest(_))));
    assert!(!paths.audio.exists());
    assert!(!paths.cues.exists());
}

#[tokio::test]
async fn configured_frame_rate_drives_cue_count() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("speech.wav");
    std::fs::write(&source, audio_with_frame_amplitudes(&[0; 24])).unwrap();

    let mut config = LipSyncConfig::default();
    config.extractor.frame_rate = 30;
    let pipeline = LipSyncPipeline::new(&config, WavFileSynthesizer::new(&source))
        .with_paths(paths_in(dir.path()));

    let generated = pipeline.generate("one second").await.unwrap();
    assert_eq!(generated.track.len(), 30);
}

#[tokio::test]
async fn failed_cue_write_keeps_previous_audio() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("speech.wav");
    std::fs::write(&source, audio_with_frame_amplitudes(&[800; 24])).unwrap();

    let paths = paths_in(dir.path());
    fae_lipsync::artifacts::write_atomic(&paths.audio, b"old audio").unwrap();
    std::fs::create_dir_all(&paths.cues).unwrap();
    std::fs::write(paths.cues.join("keep"), b"x").unwrap();

    let pipeline = LipSyncPipeline::new(&LipSyncConfig::default(), WavFileSynthesizer::new(&source))
        .with_paths(paths.clone());
    let result = pipeline.generate("Hello").await;

    assert!(matches!(result, Err(LipSyncError::Io(_))));
    assert_eq!(std::fs::read(&paths.audio).unwrap(), b"old audio");
}
