//! Energy classification and neighbour-aware refinement.

use super::MouthShape;
use super::thresholds::Thresholds;

/// Ratio by which a frame must exceed both neighbours to count as a plosive burst.
const PLOSIVE_RATIO: f64 = 1.5;
/// Relative neighbour difference below which a frame sits on a plateau.
const PLATEAU_TOLERANCE: f64 = 0.1;

/// Map one frame's energy onto a mouth shape.
///
/// Buckets are half-open: a frame exactly at a cut point belongs to the
/// bucket above it. When every frame carried the same energy, frames at that
/// level are closed instead of falling through to wide.
pub fn classify(energy: f64, thresholds: &Thresholds) -> MouthShape {
    if energy < thresholds.silence || (thresholds.is_collapsed() && energy <= thresholds.silence) {
        MouthShape::Closed
    } else if energy < thresholds.low {
        MouthShape::HalfOpen
    } else if energy < thresholds.medium {
        MouthShape::Open
    } else {
        MouthShape::Wide
    }
}

/// Override interior shapes from neighbouring energies.
///
/// Per frame, in order: a local energy spike becomes wide (stop-consonant
/// burst); then an open frame on an energy plateau is varied to wide every
/// third index or half-open every fifth, so sustained vowels do not freeze.
pub fn refine_in_context(shapes: &mut [MouthShape], energies: &[f64]) {
    let n = shapes.len().min(energies.len());
    if n < 3 {
        return;
    }
    for i in 1..n - 1 {
        let energy = energies[i];
        let prev = energies[i - 1];
        let next = energies[i + 1];

        if energy > prev * PLOSIVE_RATIO && energy > next * PLOSIVE_RATIO {
            shapes[i] = MouthShape::Wide;
        }

        let plateau = (energy - prev).abs() < energy * PLATEAU_TOLERANCE
            && (energy - next).abs() < energy * PLATEAU_TOLERANCE;
        if plateau && shapes[i] == MouthShape::Open {
            if i % 3 == 0 {
                shapes[i] = MouthShape::Wide;
            } else if i % 5 == 0 {
                shapes[i] = MouthShape::HalfOpen;
            }
        }
    }
}
