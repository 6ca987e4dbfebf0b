//! Post-classification passes over the shape track.

use tracing::debug;

use super::{MouthShape, ShapeCounts};

/// Minimum share of frames each expressive shape should occupy.
const MIN_SHARE: f64 = 0.05;
/// Absolute floor for the per-shape minimum.
const MIN_FLOOR: usize = 2;

/// Candidate frames for injected shapes: `start, start + stride, ...`,
/// stopping `end_margin` frames before the end of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start: usize,
    pub stride: usize,
    pub end_margin: usize,
}

impl ScanWindow {
    pub const DEFAULT: Self = Self {
        start: 5,
        stride: 4,
        end_margin: 5,
    };
}

/// Replace isolated single-frame outliers with their matching neighbours.
///
/// A forward in-place scan: a frame fixed at `i` is already the `prev` seen
/// at `i + 1`.
pub fn smooth_jitter(shapes: &mut [MouthShape]) {
    if shapes.len() < 3 {
        return;
    }
    for i in 1..shapes.len() - 1 {
        let prev = shapes[i - 1];
        if prev == shapes[i + 1] && shapes[i] != prev {
            shapes[i] = prev;
        }
    }
}

/// Per-shape minimum for a track of `frame_count` frames.
pub fn minimum_per_shape(frame_count: usize) -> usize {
    MIN_FLOOR.max((frame_count as f64 * MIN_SHARE).floor() as usize)
}

/// Top up under-represented expressive shapes.
///
/// `counts` is the distribution before enforcement. Shapes are processed in
/// [`MouthShape::EXPRESSIVE`] order; a frame claimed by an earlier shape is
/// not a candidate for later ones. The scan window is fixed, so the minimum is
/// best effort on short tracks.
pub fn enforce_minimum_distribution(shapes: &mut [MouthShape], counts: &ShapeCounts) {
    let target = minimum_per_shape(shapes.len());
    let mut claimed = vec![false; shapes.len()];
    for shape in MouthShape::EXPRESSIVE {
        let have = counts.get(shape);
        if have >= target {
            continue;
        }
        let placed = place_shape(
            shapes,
            &mut claimed,
            shape,
            ScanWindow::DEFAULT,
            target - have,
        );
        debug!(
            "added {placed} \"{}\" shapes toward minimum of {target}",
            shape.label()
        );
    }
}

/// Write `shape` into up to `limit` candidate frames of `window`, skipping
/// frames already `claimed` and frames where it or a direct neighbour already
/// shows `shape`. Rewritten frames are marked in `claimed`.
///
/// Returns the number of frames rewritten.
pub fn place_shape(
    shapes: &mut [MouthShape],
    claimed: &mut [bool],
    shape: MouthShape,
    window: ScanWindow,
    limit: usize,
) -> usize {
    let end = shapes
        .len()
        .min(claimed.len())
        .saturating_sub(window.end_margin.max(1));
    let mut placed = 0;
    let mut i = window.start.max(1);
    while i < end && placed < limit {
        if !claimed[i] && shapes[i] != shape && shapes[i - 1] != shape && shapes[i + 1] != shape
        {
            shapes[i] = shape;
            claimed[i] = true;
            placed += 1;
        }
        i += window.stride.max(1);
    }
    placed
}

/// Force the first and last frame closed.
pub fn pin_boundaries(shapes: &mut [MouthShape]) {
    if let Some(first) = shapes.first_mut() {
        *first = MouthShape::Closed;
    }
    if let Some(last) = shapes.last_mut() {
        *last = MouthShape::Closed;
    }
}
