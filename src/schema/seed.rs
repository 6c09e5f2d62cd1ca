//! Seed types for initializing the grid.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::compute::{Dimensions, GridBuffer, randomize, randomize_seeded};

/// Initial grid content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// All cells dead.
    #[default]
    Empty,
    /// Independent random cells.
    Random {
        /// Alive probability in `[0, 1]`.
        probability: f64,
        /// Fixed RNG seed (None = fresh entropy).
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Explicit list of alive `(row, col)` cells.
    Cells { cells: Vec<(usize, usize)> },
    /// Horizontal period-2 oscillator, leftmost cell at `(row, col)`.
    Blinker { row: usize, col: usize },
    /// South-east travelling glider, bounding box top-left at `(row, col)`.
    Glider { row: usize, col: usize },
}

impl Seed {
    /// Check pattern parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Pattern::Random { probability, .. } = self.pattern {
            if !(0.0..=1.0).contains(&probability) {
                return Err(ConfigError::InvalidProbability(probability));
            }
        }
        Ok(())
    }

    /// Generate the initial grid. Cells falling outside `dims` are dropped.
    pub fn generate(&self, dims: Dimensions) -> GridBuffer {
        match &self.pattern {
            Pattern::Empty => GridBuffer::new(dims),
            Pattern::Random { probability, seed } => match seed {
                Some(seed) => randomize_seeded(*seed, dims, *probability),
                None => randomize(dims, *probability),
            },
            Pattern::Cells { cells } => GridBuffer::with_alive(dims, cells.iter().copied()),
            Pattern::Blinker { row, col } => {
                GridBuffer::with_alive(dims, offset(*row, *col, &[(0, 0), (0, 1), (0, 2)]))
            }
            Pattern::Glider { row, col } => GridBuffer::with_alive(
                dims,
                offset(*row, *col, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]),
            ),
        }
    }
}

fn offset(
    row: usize,
    col: usize,
    shape: &'static [(usize, usize)],
) -> impl Iterator<Item = (usize, usize)> {
    // Overflowing positions are dropped like any other out-of-range cell
    shape
        .iter()
        .filter_map(move |&(r, c)| row.checked_add(r).zip(col.checked_add(c)))
}
