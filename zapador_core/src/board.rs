use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{generator, CellCount, Coord, Coord2, GameError, NeighborIter, NeighborIterExt, Result, ToNdIndex};

/// One grid position as the player model sees it.
///
/// A mine's `adjacent_mines` is never written and stays 0.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

/// Rectangular grid of cells.
///
/// A fresh board carries no mines; they arrive on the first reveal so the
/// opening click can be excluded (see [`generator::place_mines`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mines_placed: bool,
}

impl Board {
    pub fn new(rows: Coord, cols: Coord) -> Self {
        Self {
            cells: Array2::default((rows, cols).to_nd_index()),
            mines_placed: false,
        }
    }

    /// Board with an explicit mine layout, adjacency already counted.
    pub fn with_mines((rows, cols): Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(rows, cols);

        for &coords in mine_coords {
            board.validate_coords(coords)?;
            board.cell_mut(coords).is_mine = true;
        }

        generator::calculate_adjacent_mines(&mut board);
        board.mines_placed = true;
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub(crate) fn set_mines_placed(&mut self) {
        self.mines_placed = true;
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine)
            .count()
            .try_into()
            .unwrap()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// All positions in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cell(pos).is_flagged)
            .count()
            .try_into()
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_mines_counts_adjacency_exactly() {
        let board = Board::with_mines((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert!(board.mines_placed());
        assert_eq!(board.cell((1, 1)).adjacent_mines, 2);
        assert_eq!(board.cell((0, 1)).adjacent_mines, 1);
        assert_eq!(board.cell((2, 0)).adjacent_mines, 0);
        // mines keep their default count
        assert_eq!(board.cell((0, 0)).adjacent_mines, 0);
    }

    #[test]
    fn with_mines_rejects_out_of_bounds_layout() {
        assert_eq!(
            Board::with_mines((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn fresh_board_is_empty_and_unmined() {
        let board = Board::new(4, 5);

        assert_eq!(board.size(), (4, 5));
        assert_eq!(board.total_cells(), 20);
        assert_eq!(board.mine_count(), 0);
        assert!(!board.mines_placed());
        assert_eq!(board.cell((3, 4)), Cell::default());
    }

    #[test]
    fn count_flagged_neighbors_sees_only_the_window() {
        let mut board = Board::new(3, 3);
        board.cell_mut((0, 0)).is_flagged = true;
        board.cell_mut((2, 2)).is_flagged = true;

        assert_eq!(board.count_flagged_neighbors((1, 1)), 2);
        assert_eq!(board.count_flagged_neighbors((0, 1)), 1);
        assert_eq!(board.count_flagged_neighbors((0, 2)), 0);
    }
}
