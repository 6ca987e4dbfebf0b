//! LINEAR16 WAV container helpers.
//!
//! The extractor reads raw bytes and never parses the header. These helpers
//! let callers check what they are about to hand it, and build canonical
//! 44-byte-header buffers from raw samples.

use std::io::Cursor;

use crate::error::{LipSyncError, Result};

/// Read the format block of an in-memory WAV buffer.
///
/// # Errors
///
/// Returns an error if the buffer is not a readable RIFF/WAVE container.
pub fn probe_spec(bytes: &[u8]) -> Result<hound::WavSpec> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| LipSyncError::Audio(format!("cannot read WAV header: {e}")))?;
    Ok(reader.spec())
}

/// Whether `spec` is the mono 16-bit integer layout the extractor assumes.
pub fn matches_expected_format(spec: &hound::WavSpec, sample_rate: u32) -> bool {
    spec.channels == 1
        && spec.bits_per_sample == 16
        && spec.sample_format == hound::SampleFormat::Int
        && spec.sample_rate == sample_rate
}

/// Encode mono 16-bit samples as a WAV buffer with a 44-byte header.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn encode_pcm16_mono(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| LipSyncError::Audio(format!("failed to create wav writer: {e}")))?;
        for &s in samples {
            writer
                .write_sample(s)
                .map_err(|e| LipSyncError::Audio(format!("failed to write wav sample: {e}")))?;
        }
        writer
            .finalize()
            .map_err(|e| LipSyncError::Audio(format!("failed to finalize wav: {e}")))?;
    }
    Ok(cursor.into_inner())
}
