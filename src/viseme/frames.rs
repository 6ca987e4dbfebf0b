//! Frame segmentation and per-frame energy.

/// Size of the LINEAR16 container header preceding the samples.
pub const HEADER_BYTES: usize = 44;

const BYTES_PER_SAMPLE: usize = 2;
const CHANNELS: usize = 1;

/// How a waveform buffer is sliced into animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Number of frames (one cue each).
    pub frame_count: usize,
    /// Bytes per frame; the trailing remainder of the buffer is not read.
    pub frame_span: usize,
    /// Sample bytes after the header.
    pub data_len: usize,
}

impl FrameLayout {
    /// Compute the layout for a buffer of `byte_len` bytes.
    ///
    /// Returns `None` when the buffer holds no sample data or rounds to zero
    /// frames.
    pub fn for_waveform(byte_len: usize, frame_rate: u32, sample_rate: u32) -> Option<Self> {
        if byte_len <= HEADER_BYTES || frame_rate == 0 || sample_rate == 0 {
            return None;
        }
        let data_len = byte_len - HEADER_BYTES;
        let duration = data_len as f64 / (BYTES_PER_SAMPLE * CHANNELS) as f64 / f64::from(sample_rate);
        let frame_count = (duration * f64::from(frame_rate)).ceil() as usize;
        if frame_count == 0 {
            return None;
        }
        Some(Self {
            frame_count,
            frame_span: data_len / frame_count,
            data_len,
        })
    }

    /// Audio duration in seconds implied by the sample data.
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        self.data_len as f64 / (BYTES_PER_SAMPLE * CHANNELS) as f64 / f64::from(sample_rate)
    }

    /// Byte range `[start, end)` of frame `index` within the full buffer.
    pub fn byte_range(&self, index: usize, byte_len: usize) -> std::ops::Range<usize> {
        let start = HEADER_BYTES + index * self.frame_span;
        let end = (start + self.frame_span).min(byte_len);
        start.min(end)..end
    }
}

/// Mean absolute sample value of every frame, in frame order.
///
/// Samples are little-endian signed 16-bit; a dangling odd byte at the end of
/// a frame is ignored but still counts toward the frame's half-sample size.
pub fn frame_energies(waveform: &[u8], layout: &FrameLayout) -> Vec<f64> {
    (0..layout.frame_count)
        .map(|i| {
            let bytes = &waveform[layout.byte_range(i, waveform.len())];
            let sum: f64 = bytes
                .chunks_exact(BYTES_PER_SAMPLE)
                .map(|pair| f64::from(i16::from_le_bytes([pair[0], pair[1]])).abs())
                .sum();
            let sample_count = bytes.len() as f64 / BYTES_PER_SAMPLE as f64;
            if sample_count > 0.0 { sum / sample_count } else { 0.0 }
        })
        .collect()
}
