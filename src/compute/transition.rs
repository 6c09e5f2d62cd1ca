//! Transition rule - Next generation of Conway's Game of Life.
//!
//! The grid is bounded: neighbor positions that fall outside the grid count
//! as dead and never wrap to the opposite edge.

use rayon::prelude::*;

use super::GridBuffer;

/// Relative offsets of the 8 neighbors, excluding the cell itself.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Count alive neighbors of `(row, col)`.
///
/// Positions outside `[0, rows) x [0, cols)` contribute nothing, so edge
/// cells have 5 candidate neighbors and corner cells 3.
#[inline]
pub fn live_neighbors(grid: &GridBuffer, row: usize, col: usize) -> u8 {
    let mut count = 0;
    for (dr, dc) in NEIGHBOR_OFFSETS {
        let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        // is_alive reads out-of-range positions as dead
        if grid.is_alive(r, c) {
            count += 1;
        }
    }
    count
}

/// Conway rule for one cell.
///
/// - Alive with 2 or 3 neighbors survives
/// - Dead with exactly 3 neighbors is born
/// - Everything else is dead next generation
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Compute the next generation.
///
/// Every count is taken from `grid`, never from partially computed output.
/// Rows are computed in parallel; the result has the same shape as the input.
pub fn step(grid: &GridBuffer) -> GridBuffer {
    let dims = grid.dimensions();
    let cols = dims.cols();

    let mut cells = vec![false; dims.cell_count()];
    cells
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = next_state(grid.is_alive(row, col), live_neighbors(grid, row, col));
            }
        });

    GridBuffer::from_cells(dims, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Dimensions;

    fn grid(alive: &[(usize, usize)]) -> GridBuffer {
        GridBuffer::with_alive(Dimensions::default(), alive.iter().copied())
    }

    fn advance(grid: &GridBuffer, generations: u64) -> GridBuffer {
        (0..generations).fold(grid.clone(), |current, _| step(&current))
    }

    fn alive(grid: &GridBuffer) -> Vec<(usize, usize)> {
        grid.alive_cells().collect()
    }

    #[test]
    fn test_rule_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn test_neighbor_count_is_clipped_at_corners() {
        // Fill the whole grid: a corner sees 3, an edge 5, an interior cell 8
        let dims = Dimensions::new(10, 10).unwrap();
        let all = (0..10).flat_map(|r| (0..10).map(move |c| (r, c)));
        let full = GridBuffer::with_alive(dims, all);

        assert_eq!(live_neighbors(&full, 0, 0), 3);
        assert_eq!(live_neighbors(&full, 9, 9), 3);
        assert_eq!(live_neighbors(&full, 0, 5), 5);
        assert_eq!(live_neighbors(&full, 5, 9), 5);
        assert_eq!(live_neighbors(&full, 4, 4), 8);
    }

    #[test]
    fn test_no_wraparound() {
        // Alive cells on the far edge must not count for column 0
        let g = grid(&[(4, 19), (5, 19), (6, 19)]);
        assert_eq!(live_neighbors(&g, 5, 0), 0);

        let next = step(&g);
        assert!(!next.is_alive(5, 0));
    }

    #[test]
    fn test_isolated_cell_dies() {
        // Interior
        assert_eq!(step(&grid(&[(10, 10)])).population(), 0);
        // Edge
        assert_eq!(step(&grid(&[(0, 7)])).population(), 0);
        // Corner
        assert_eq!(step(&grid(&[(19, 19)])).population(), 0);
    }

    #[test]
    fn test_birth_interior_and_edge() {
        // Interior: (5,5) has neighbors (4,4), (4,6), (6,5)
        let next = step(&grid(&[(4, 4), (4, 6), (6, 5)]));
        assert!(next.is_alive(5, 5));

        // Edge: (0,5) has neighbors (0,4), (0,6), (1,5)
        let next = step(&grid(&[(0, 4), (0, 6), (1, 5)]));
        assert!(next.is_alive(0, 5));
    }

    #[test]
    fn test_interior_blinker_oscillates() {
        let horizontal = grid(&[(10, 9), (10, 10), (10, 11)]);
        let vertical = step(&horizontal);
        assert_eq!(alive(&vertical), vec![(9, 10), (10, 10), (11, 10)]);
        assert_eq!(step(&vertical), horizontal);
    }

    #[test]
    fn test_top_edge_blinker() {
        // Row -1 does not exist, so only the downward half of the blinker forms
        let g = grid(&[(0, 1), (0, 2), (0, 3)]);
        let next = step(&g);
        assert_eq!(alive(&next), vec![(0, 2), (1, 2)]);

        // A vertical domino has one neighbor each and dies out
        let after = step(&next);
        assert_eq!(after.population(), 0);
    }

    #[test]
    fn test_block_is_still_life() {
        let block = grid(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(step(&block), block);
    }

    #[test]
    fn test_glider_translates() {
        let glider = grid(&[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let moved = advance(&glider, 4);
        assert_eq!(alive(&moved), vec![(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
    }

    #[test]
    fn test_step_preserves_shape() {
        let dims = Dimensions::new(13, 57).unwrap();
        let g = GridBuffer::with_alive(dims, [(0, 0), (12, 56), (6, 30), (6, 31), (6, 32)]);
        let next = step(&step(&g));
        assert_eq!(next.dimensions(), dims);
        assert!(next.iter_rows().all(|row| row.len() == 57));
    }

    #[test]
    fn test_step_does_not_touch_input() {
        let g = grid(&[(3, 3), (3, 4), (3, 5)]);
        let copy = g.clone();
        let _ = step(&g);
        assert_eq!(g, copy);
    }
}
