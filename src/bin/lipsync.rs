//! CLI binary for fae-lipsync.
//!
//! Tracing output goes to stderr so that stdout can carry the cue JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fae_lipsync::artifacts::write_atomic;
use fae_lipsync::tts::WavFileSynthesizer;
use fae_lipsync::viseme::{FrameLayout, Thresholds, frame_energies};
use fae_lipsync::{LipSyncConfig, LipSyncPipeline, VisemeExtractor, wav};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Fae lip-sync: mouth cues from synthesized speech.
#[derive(Parser)]
#[command(name = "fae-lipsync", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "FAE_LIPSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Extract mouth cues from a LINEAR16 WAV file.
    Extract {
        /// Input WAV (44-byte header, mono, 16-bit).
        wav: PathBuf,
        /// Write the cue JSON here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the configured cue rate (frames per second).
        #[arg(long)]
        frame_rate: Option<u32>,
    },

    /// Print frame count, energy thresholds and shape distribution.
    Stats {
        /// Input WAV (44-byte header, mono, 16-bit).
        wav: PathBuf,
    },

    /// Treat a pre-rendered WAV as the speech for `text` and write both
    /// artifacts to the configured output paths.
    Generate {
        /// Text the audio speaks.
        text: String,
        /// Pre-rendered speech for the text.
        #[arg(long)]
        audio: PathBuf,
    },

    /// Write the default configuration file.
    InitConfig {
        /// Destination (defaults to the user config directory).
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fae_lipsync=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        LipSyncConfig::from_file(path)?
    } else {
        LipSyncConfig::default()
    };

    match cli.command {
        Command::Extract {
            wav,
            output,
            frame_rate,
        } => run_extract(config, &wav, output.as_deref(), frame_rate),
        Command::Stats { wav } => run_stats(&config, &wav),
        Command::Generate { text, audio } => run_generate(&config, &text, audio).await,
        Command::InitConfig { path } => {
            let path = path.unwrap_or_else(LipSyncConfig::default_config_path);
            LipSyncConfig::default().save_to_file(&path)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

fn read_waveform(path: &Path, sample_rate: u32) -> anyhow::Result<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    match wav::probe_spec(&bytes) {
        Ok(spec) if !wav::matches_expected_format(&spec, sample_rate) => warn!(
            "{} is {} ch / {} bit / {} Hz, expected mono 16-bit {} Hz",
            path.display(),
            spec.channels,
            spec.bits_per_sample,
            spec.sample_rate,
            sample_rate
        ),
        Ok(_) => {}
        Err(e) => warn!("{}: {e}", path.display()),
    }
    Ok(bytes)
}

fn run_extract(
    mut config: LipSyncConfig,
    path: &Path,
    output: Option<&Path>,
    frame_rate: Option<u32>,
) -> anyhow::Result<()> {
    if let Some(rate) = frame_rate {
        anyhow::ensure!(rate > 0, "frame rate must be greater than zero");
        config.extractor.frame_rate = rate;
    }
    let bytes = read_waveform(path, config.extractor.sample_rate)?;
    let track = VisemeExtractor::new(&config.extractor).extract(&bytes);
    let json = track.to_json()?;

    match output {
        Some(out) => {
            write_atomic(out, json.as_bytes())?;
            info!("wrote {} cues to {}", track.len(), out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_stats(config: &LipSyncConfig, path: &Path) -> anyhow::Result<()> {
    let extractor = config.extractor;
    let bytes = read_waveform(path, extractor.sample_rate)?;

    let Some(layout) =
        FrameLayout::for_waveform(bytes.len(), extractor.frame_rate, extractor.sample_rate)
    else {
        println!("no audio frames ({} bytes)", bytes.len());
        return Ok(());
    };
    let energies = frame_energies(&bytes, &layout);
    let thresholds = Thresholds::from_energies(&energies);
    let counts = VisemeExtractor::new(&extractor).extract(&bytes).counts();

    println!("duration:   {:.3}s", layout.duration_secs(extractor.sample_rate));
    println!("frames:     {} ({} bytes each)", layout.frame_count, layout.frame_span);
    println!(
        "thresholds: silence={:.1} low={:.1} medium={:.1}",
        thresholds.silence, thresholds.low, thresholds.medium
    );
    println!(
        "shapes:     A={} B={} C={} D={}",
        counts.open, counts.closed, counts.half_open, counts.wide
    );
    Ok(())
}

async fn run_generate(config: &LipSyncConfig, text: &str, audio: PathBuf) -> anyhow::Result<()> {
    let pipeline = LipSyncPipeline::new(config, WavFileSynthesizer::new(audio));
    let generated = pipeline.generate(text).await?;
    println!(
        "{} cues ({:.2}s) -> {}",
        generated.track.len(),
        generated.track.duration(),
        generated.paths.cues.display()
    );
    Ok(())
}
