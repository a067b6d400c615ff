use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional board position `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(center, bounds)
    }
}

/// Walks the 8-neighborhood of `center` in row-major order, clipped to the
/// grid bounds and never yielding `center` itself.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    row: Coord,
    col: Coord,
    col_start: Coord,
    row_end: Coord,
    col_end: Coord,
    done: bool,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, col) = center;
        let (rows, cols) = bounds;

        let row_start = row.saturating_sub(1);
        let col_start = col.saturating_sub(1);
        // inclusive window ends, clipped to the last valid index
        let row_end = row.saturating_add(1).min(rows.saturating_sub(1));
        let col_end = col.saturating_add(1).min(cols.saturating_sub(1));

        Self {
            center,
            row: row_start,
            col: col_start,
            col_start,
            row_end,
            col_end,
            done: rows == 0 || cols == 0 || row >= rows || col >= cols,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let item = (self.row, self.col);

            if self.col < self.col_end {
                self.col += 1;
            } else if self.row < self.row_end {
                self.col = self.col_start;
                self.row += 1;
            } else {
                self.done = true;
            }

            if item != self.center {
                return Some(item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors_of(bounds: Coord2, center: Coord2) -> Vec<Coord2> {
        let grid: Array2<u8> = Array2::default(bounds.to_nd_index());
        grid.iter_neighbors(center).collect()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let found = neighbors_of((3, 3), (1, 1));
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));
    }

    #[test]
    fn corner_and_edge_cells_are_clipped() {
        assert_eq!(neighbors_of((3, 3), (0, 0)), vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(neighbors_of((3, 3), (2, 2)), vec![(1, 1), (1, 2), (2, 1)]);
        assert_eq!(neighbors_of((3, 3), (0, 1)).len(), 5);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert!(neighbors_of((1, 1), (0, 0)).is_empty());
    }
}
