//! Mine placement and adjacency counting.

use rand::Rng;

use crate::{Board, CellCount, Coord2, GameError, Result};

/// Scatters `mine_count` mines uniformly over the board, never on `exclude`.
///
/// Rejection sampling, as many times as it takes: a draw landing on an
/// existing mine or on the excluded cell is simply redrawn. The capacity
/// check up front keeps at least one cell mine-free, so the loop terminates
/// with probability 1.
pub fn place_mines(
    board: &mut Board,
    exclude: Coord2,
    mine_count: CellCount,
    rng: &mut impl Rng,
) -> Result<()> {
    if mine_count.saturating_add(1) > board.total_cells() {
        return Err(GameError::TooManyMines);
    }
    let exclude = board.validate_coords(exclude)?;

    let (rows, cols) = board.size();
    let mut placed: CellCount = 0;

    while placed < mine_count {
        let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
        if coords == exclude || board.cell(coords).is_mine {
            continue;
        }
        board.cell_mut(coords).is_mine = true;
        placed += 1;
    }

    calculate_adjacent_mines(board);
    board.set_mines_placed();
    log::debug!("placed {} mines, excluding {:?}", placed, exclude);
    Ok(())
}

/// Writes the bounds-clipped 8-neighborhood mine count into every non-mine
/// cell.
pub fn calculate_adjacent_mines(board: &mut Board) {
    let (rows, cols) = board.size();
    for row in 0..rows {
        for col in 0..cols {
            let coords = (row, col);
            if board.cell(coords).is_mine {
                continue;
            }

            let count = board
                .iter_neighbors(coords)
                .filter(|&pos| board.cell(pos).is_mine)
                .count()
                .try_into()
                .unwrap();
            board.cell_mut(coords).adjacent_mines = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn places_exact_count_and_never_the_excluded_cell() {
        for seed in 0..32 {
            let mut board = Board::new(2, 2);
            let mut rng = SmallRng::seed_from_u64(seed);

            place_mines(&mut board, (1, 1), 1, &mut rng).unwrap();

            assert_eq!(board.mine_count(), 1);
            assert!(!board.cell((1, 1)).is_mine);
            assert!(board.mines_placed());
        }
    }

    #[test]
    fn adjacency_matches_a_recount_after_random_placement() {
        let mut board = Board::new(5, 5);
        let mut rng = SmallRng::seed_from_u64(7);

        place_mines(&mut board, (2, 2), 6, &mut rng).unwrap();

        assert_eq!(board.mine_count(), 6);
        for coords in board.iter_coords().collect::<Vec<_>>() {
            if board.cell(coords).is_mine {
                continue;
            }
            let expected: u8 = board
                .iter_neighbors(coords)
                .filter(|&pos| board.cell(pos).is_mine)
                .count()
                .try_into()
                .unwrap();
            assert_eq!(board.cell(coords).adjacent_mines, expected);
        }
    }

    #[test]
    fn rejects_a_board_with_no_room_for_the_exclusion() {
        let mut board = Board::new(2, 2);
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            place_mines(&mut board, (0, 0), 4, &mut rng),
            Err(GameError::TooManyMines)
        );
        assert_eq!(board.mine_count(), 0);
    }

    #[test]
    fn can_fill_every_cell_but_one() {
        let mut board = Board::new(2, 2);
        let mut rng = SmallRng::seed_from_u64(3);

        place_mines(&mut board, (0, 1), 3, &mut rng).unwrap();

        assert_eq!(board.mine_count(), 3);
        assert!(!board.cell((0, 1)).is_mine);
        assert_eq!(board.cell((0, 1)).adjacent_mines, 3);
    }
}
