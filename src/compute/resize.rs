//! Resize with preservation of the overlapping region.

use super::{Dimensions, GridBuffer};

/// Re-shape `grid` to `dims`.
///
/// Cells inside `[0, min(rows)) x [0, min(cols))` keep their value. Cells
/// exposed by growth are dead, and cells cut off by shrinking are dropped.
pub fn resize(grid: &GridBuffer, dims: Dimensions) -> GridBuffer {
    if grid.dimensions() == dims {
        return grid.clone();
    }

    let keep_cols = grid.cols().min(dims.cols());
    let mut cells = Vec::with_capacity(dims.cell_count());

    for row in 0..dims.rows() {
        match grid.row(row) {
            Some(old) => {
                cells.extend_from_slice(&old[..keep_cols]);
                cells.resize(cells.len() + (dims.cols() - keep_cols), false);
            }
            None => cells.resize(cells.len() + dims.cols(), false),
        }
    }

    GridBuffer::from_cells(dims, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(rows: usize, cols: usize) -> Dimensions {
        Dimensions::new(rows, cols).unwrap()
    }

    fn checkerboard(d: Dimensions) -> GridBuffer {
        let alive = (0..d.rows())
            .flat_map(|r| (0..d.cols()).map(move |c| (r, c)))
            .filter(|(r, c)| (r + c) % 2 == 0);
        GridBuffer::with_alive(d, alive)
    }

    fn assert_overlap_preserved(old: &GridBuffer, new: &GridBuffer) {
        let keep_rows = old.rows().min(new.rows());
        let keep_cols = old.cols().min(new.cols());
        for r in 0..new.rows() {
            for c in 0..new.cols() {
                if r < keep_rows && c < keep_cols {
                    assert_eq!(new.value(r, c), old.value(r, c), "overlap ({r}, {c})");
                } else {
                    assert_eq!(new.value(r, c), 0, "exposed ({r}, {c})");
                }
            }
        }
    }

    #[test]
    fn test_grow_pads_with_dead() {
        let old = checkerboard(dims(10, 12));
        let new = resize(&old, dims(25, 30));
        assert_eq!(new.dimensions(), dims(25, 30));
        assert_overlap_preserved(&old, &new);
        assert_eq!(new.population(), old.population());
    }

    #[test]
    fn test_shrink_discards() {
        let old = checkerboard(dims(40, 40));
        let new = resize(&old, dims(10, 15));
        assert_eq!(new.dimensions(), dims(10, 15));
        assert_overlap_preserved(&old, &new);
    }

    #[test]
    fn test_mixed_grow_and_shrink() {
        let old = checkerboard(dims(30, 10));
        let new = resize(&old, dims(10, 30));
        assert_overlap_preserved(&old, &new);
        assert!(new.iter_rows().all(|row| row.len() == 30));
    }

    #[test]
    fn test_same_shape_is_identity() {
        let old = checkerboard(dims(20, 20));
        assert_eq!(resize(&old, dims(20, 20)), old);
    }

    #[test]
    fn test_out_of_bounds_rejected_before_resize() {
        assert!(Dimensions::new(101, 20).is_err());
        assert!(Dimensions::new(20, 9).is_err());
    }
}
