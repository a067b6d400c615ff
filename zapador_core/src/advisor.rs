//! Hint deduction: find a provably-safe unrevealed cell, falling back to any
//! mine-free hidden cell.

use rand::Rng;

use crate::{Board, Coord2};

/// Can this cell be offered as a hint at all: unrevealed, unflagged, and
/// actually mine-free.
fn is_candidate(board: &Board, coords: Coord2) -> bool {
    let cell = board.cell(coords);
    !cell.is_revealed && !cell.is_flagged && !cell.is_mine
}

/// A revealed numbered neighbor whose flagged-neighbor count matches its
/// number proves `coords` safe: all of that neighbor's mines are accounted
/// for by flags, so its remaining hidden neighbors cannot hold one.
///
/// The deduction is local to one clue at a time and misses safe cells that
/// need multi-constraint reasoning.
pub fn is_deductively_safe(board: &Board, coords: Coord2) -> bool {
    board.iter_neighbors(coords).any(|pos| {
        let clue = board.cell(pos);
        clue.is_revealed
            && !clue.is_mine
            && clue.adjacent_mines > 0
            && board.count_flagged_neighbors(pos) == clue.adjacent_mines
    })
}

/// Picks a safe cell to suggest, uniformly at random from the deduced pool,
/// or from all hidden safe cells when deduction comes up empty. `None` only
/// when no candidate exists at all.
pub fn find_safe_move(board: &Board, rng: &mut impl Rng) -> Option<Coord2> {
    let mut pool: Vec<Coord2> = board
        .iter_coords()
        .filter(|&coords| is_candidate(board, coords) && is_deductively_safe(board, coords))
        .collect();

    if pool.is_empty() {
        pool = board
            .iter_coords()
            .filter(|&coords| is_candidate(board, coords))
            .collect();
        log::trace!("no deduced cells, falling back to {} candidates", pool.len());
    }

    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.random_range(0..pool.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn fixed_rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn fully_flagged_clue_proves_its_other_neighbors_safe() {
        // mine at (0,0); the clue at (1,1) reads 1
        let mut board = Board::with_mines((3, 3), &[(0, 0)]).unwrap();
        board.cell_mut((1, 1)).is_revealed = true;
        board.cell_mut((0, 0)).is_flagged = true;

        assert!(is_deductively_safe(&board, (0, 1)));
        assert!(is_deductively_safe(&board, (2, 2)));
        // out of the clue's window, nothing is proven
        board.cell_mut((1, 1)).is_revealed = false;
        assert!(!is_deductively_safe(&board, (0, 1)));
    }

    #[test]
    fn unflagged_clue_proves_nothing() {
        let mut board = Board::with_mines((3, 3), &[(0, 0)]).unwrap();
        board.cell_mut((1, 1)).is_revealed = true;

        assert!(!is_deductively_safe(&board, (0, 1)));
    }

    #[test]
    fn deduced_pool_is_preferred_over_the_fallback() {
        // only cells in the clue's window are provably safe, the rest of the
        // board stays in the fallback pool
        let mut board = Board::with_mines((4, 4), &[(0, 0)]).unwrap();
        board.cell_mut((1, 1)).is_revealed = true;
        board.cell_mut((0, 0)).is_flagged = true;

        let mut rng = fixed_rng();
        for _ in 0..16 {
            let (row, col) = find_safe_move(&board, &mut rng).unwrap();
            assert!(row <= 2 && col <= 2);
            assert!((row, col) != (0, 0) && (row, col) != (1, 1));
        }
    }

    #[test]
    fn falls_back_to_any_hidden_safe_cell() {
        let board = Board::with_mines((2, 2), &[(0, 0)]).unwrap();

        let mut rng = fixed_rng();
        for _ in 0..16 {
            let found = find_safe_move(&board, &mut rng).unwrap();
            assert_ne!(found, (0, 0));
        }
    }

    #[test]
    fn returns_none_when_every_candidate_is_flagged_or_revealed() {
        let mut board = Board::with_mines((2, 1), &[(0, 0)]).unwrap();
        board.cell_mut((1, 0)).is_flagged = true;

        assert_eq!(find_safe_move(&board, &mut fixed_rng()), None);
    }
}
