//! Grid buffer - One generation of cells on a bounded 2D grid.
//!
//! A [`GridBuffer`] is a value: every edit produces a new buffer and the old
//! one is left untouched, so a generation can never alias its successor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest accepted row or column count.
pub const MIN_DIMENSION: usize = 10;
/// Largest accepted row or column count.
pub const MAX_DIMENSION: usize = 100;
/// Rows and columns used when nothing else is configured.
pub const DEFAULT_DIMENSION: usize = 20;

/// Grid axis, used to report which dimension was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Rows,
    Cols,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => f.write_str("rows"),
            Axis::Cols => f.write_str("cols"),
        }
    }
}

/// Grid construction and editing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("{axis} = {value} is outside [{min}, {max}]", min = MIN_DIMENSION, max = MAX_DIMENSION)]
    OutOfBoundsDimension { axis: Axis, value: usize },
    #[error("Cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    InvalidCoordinate {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Validated grid shape. Both axes lie in `[MIN_DIMENSION, MAX_DIMENSION]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions", into = "RawDimensions")]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

#[derive(Serialize, Deserialize)]
struct RawDimensions {
    rows: usize,
    cols: usize,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = GridError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Dimensions::new(raw.rows, raw.cols)
    }
}

impl From<Dimensions> for RawDimensions {
    fn from(dims: Dimensions) -> Self {
        Self {
            rows: dims.rows,
            cols: dims.cols,
        }
    }
}

impl Dimensions {
    /// Validate a `rows x cols` shape.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        check_axis(Axis::Rows, rows)?;
        check_axis(Axis::Cols, cols)?;
        Ok(Self { rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether `(row, col)` addresses a cell of this shape.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_DIMENSION,
            cols: DEFAULT_DIMENSION,
        }
    }
}

fn check_axis(axis: Axis, value: usize) -> Result<(), GridError> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(GridError::OutOfBoundsDimension { axis, value })
    }
}

/// One generation of cells.
///
/// Cells are stored row-major: index `row * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridBuffer {
    dims: Dimensions,
    cells: Vec<bool>,
}

impl GridBuffer {
    /// All-dead grid of the given shape.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![false; dims.cell_count()],
        }
    }

    /// All-dead grid, validating the shape first.
    pub fn create(rows: usize, cols: usize) -> Result<Self, GridError> {
        Ok(Self::new(Dimensions::new(rows, cols)?))
    }

    /// Build a grid from row-major cells.
    ///
    /// Callers inside the crate guarantee `cells.len() == dims.cell_count()`.
    pub(crate) fn from_cells(dims: Dimensions, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), dims.cell_count());
        Self { dims, cells }
    }

    /// Build a grid with the listed cells alive. Coordinates outside the
    /// shape are ignored.
    pub fn with_alive<I>(dims: Dimensions, alive: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut cells = vec![false; dims.cell_count()];
        for (row, col) in alive {
            if dims.contains(row, col) {
                cells[row * dims.cols + col] = true;
            }
        }
        Self { dims, cells }
    }

    /// New grid identical to this one except that `(row, col)` is flipped.
    pub fn toggle(&self, row: usize, col: usize) -> Result<Self, GridError> {
        let idx = self.checked_idx(row, col)?;
        let mut cells = self.cells.clone();
        cells[idx] = !cells[idx];
        Ok(Self {
            dims: self.dims,
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Whether `(row, col)` is alive. Out-of-range coordinates read as dead.
    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.dims.contains(row, col) && self.cells[row * self.dims.cols + col]
    }

    /// Cell value as 0 or 1.
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> u8 {
        u8::from(self.is_alive(row, col))
    }

    /// One row of cells, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        (row < self.dims.rows).then(|| {
            let start = row * self.dims.cols;
            &self.cells[start..start + self.dims.cols]
        })
    }

    /// Iterate rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.dims.cols)
    }

    /// Coordinates of all alive cells, row-major.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.dims.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    fn checked_idx(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if self.dims.contains(row, col) {
            Ok(row * self.dims.cols + col)
        } else {
            Err(GridError::InvalidCoordinate {
                row,
                col,
                rows: self.dims.rows,
                cols: self.dims.cols,
            })
        }
    }
}

impl Default for GridBuffer {
    fn default() -> Self {
        Self::new(Dimensions::default())
    }
}

impl fmt::Display for GridBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Population statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub rows: usize,
    pub cols: usize,
    pub alive: usize,
    pub dead: usize,
    /// Alive share in `[0, 1]`.
    pub density: f32,
}

impl GridStats {
    /// Compute statistics from a grid.
    pub fn from_grid(grid: &GridBuffer) -> Self {
        let total = grid.dimensions().cell_count();
        let alive = grid.population();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            alive,
            dead: total - alive,
            density: alive as f32 / total as f32,
        }
    }
}
