//! Random population of grids.

use rand::prelude::*;

use super::{Dimensions, GridBuffer};

/// Share of cells set alive by [`randomize`] when no probability is configured.
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.3;

/// Grid with every cell independently alive with `alive_probability`.
///
/// Uses the thread-local entropy-seeded RNG, so results differ per call.
pub fn randomize(dims: Dimensions, alive_probability: f64) -> GridBuffer {
    randomize_with(&mut thread_rng(), dims, alive_probability)
}

/// Same as [`randomize`], drawing from a caller-supplied RNG.
///
/// The probability is clamped into `[0, 1]`; NaN counts as 0.
pub fn randomize_with<R: Rng + ?Sized>(
    rng: &mut R,
    dims: Dimensions,
    alive_probability: f64,
) -> GridBuffer {
    let p = if alive_probability.is_nan() {
        0.0
    } else {
        alive_probability.clamp(0.0, 1.0)
    };

    let cells = (0..dims.cell_count()).map(|_| rng.gen_bool(p)).collect();
    GridBuffer::from_cells(dims, cells)
}

/// Seeded variant for reproducible grids.
pub fn randomize_seeded(seed: u64, dims: Dimensions, alive_probability: f64) -> GridBuffer {
    randomize_with(&mut StdRng::seed_from_u64(seed), dims, alive_probability)
}
