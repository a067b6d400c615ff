use chrono::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::{
    advisor, generator, Board, Cell, CellCount, Coord2, GameConfig, HintOutcome, MarkOutcome,
    Result, RevealOutcome,
};

/// Hint charges handed out per round.
pub const DEFAULT_HINTS: u8 = 3;

/// Valid transitions:
/// - Ready -> Active (first reveal, mines placed, timer anchored)
/// - Active -> Won | Lost (terminal)
/// - any -> Ready (new game / reset)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    Ready,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Counter snapshot handed to the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub mine_count: CellCount,
    pub flagged_count: CellCount,
    pub hints_remaining: u8,
    pub elapsed_secs: u32,
}

/// Represents one round from first click to win or loss.
///
/// Owns exactly one board at a time; a new game replaces it wholesale. All
/// mutation happens synchronously inside the command methods, and disallowed
/// but harmless input comes back as a `NoChange`/`Unavailable` outcome rather
/// than an error.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    state: SessionState,
    revealed_count: CellCount,
    flagged_count: CellCount,
    hints_remaining: u8,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    rng: SmallRng,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.rows, config.cols),
            config,
            state: Default::default(),
            revealed_count: 0,
            flagged_count: 0,
            hints_remaining: DEFAULT_HINTS,
            started_at: None,
            ended_at: None,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Session over a prepared layout; the first reveal will not place mines.
    pub fn with_board(board: Board, seed: u64) -> Self {
        let (rows, cols) = board.size();
        let config = GameConfig::new_unchecked(rows, cols, board.mine_count());
        Self {
            config,
            board,
            state: Default::default(),
            revealed_count: 0,
            flagged_count: 0,
            hints_remaining: DEFAULT_HINTS,
            started_at: None,
            ended_at: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board.cell(coords))
    }

    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    /// How many mines have not been flagged yet.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    /// Seconds since the first reveal, frozen at game end, 0 before start.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            mine_count: self.config.mines,
            flagged_count: self.flagged_count,
            hints_remaining: self.hints_remaining,
            elapsed_secs: self.elapsed_secs(),
        }
    }

    /// Fresh round with a new configuration.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.restart(config);
        Ok(())
    }

    /// Fresh round with the current configuration.
    pub fn reset(&mut self) {
        self.restart(self.config);
    }

    fn restart(&mut self, config: GameConfig) {
        log::debug!("new round: {:?}", config);
        self.config = config;
        self.board = Board::new(config.rows, config.cols);
        self.state = SessionState::Ready;
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.hints_remaining = DEFAULT_HINTS;
        self.started_at = None;
        self.ended_at = None;
    }

    /// Open a cell. The first reveal of a round places the mines, never under
    /// the revealed cell, and anchors the timer.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.board.cell(coords);
        if cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.board.mines_placed() {
            generator::place_mines(&mut self.board, coords, self.config.mines, &mut self.rng)?;
        }
        self.mark_started();

        Ok(self.reveal_cell(coords))
    }

    /// Opens a single cell and flood-fills the surrounding zero-count region.
    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.board.cell(coords);
        self.board.cell_mut(coords).is_revealed = true;

        if cell.is_mine {
            log::debug!("mine hit at {:?}", coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        self.revealed_count += 1;
        log::trace!("revealed {:?}, adjacent mines: {}", coords, cell.adjacent_mines);

        if cell.adjacent_mines == 0 {
            // Iterative worklist; the revealed flag is the semantic visited
            // set, the HashSet only stops double-queueing within this pass.
            let mut visited = HashSet::from([coords]);
            let mut to_visit: VecDeque<Coord2> = self.board.iter_neighbors(coords).collect();

            while let Some(visit_coords) = to_visit.pop_front() {
                if !visited.insert(visit_coords) {
                    continue;
                }

                let visit_cell = self.board.cell(visit_coords);
                if visit_cell.is_revealed || visit_cell.is_flagged {
                    continue;
                }

                self.board.cell_mut(visit_coords).is_revealed = true;
                self.revealed_count += 1;
                log::trace!(
                    "flood opened {:?}, adjacent mines: {}",
                    visit_coords,
                    visit_cell.adjacent_mines
                );

                if visit_cell.adjacent_mines == 0 {
                    to_visit.extend(
                        self.board
                            .iter_neighbors(visit_coords)
                            .filter(|pos| !visited.contains(pos)),
                    );
                }
            }
        }

        if self.revealed_count == self.config.safe_cells() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Toggle the flag on an unrevealed cell. Rejected once revealed, and in
    /// terminal states.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = self.board.cell(coords);
        if cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }

        let flagged = !cell.is_flagged;
        self.board.cell_mut(coords).is_flagged = flagged;
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Spend one hint charge for a safe cell suggestion.
    ///
    /// Unavailable before the first reveal, after the game ends, with no
    /// charges left, or once every mine is flagged.
    pub fn request_hint(&mut self) -> HintOutcome {
        if self.hints_remaining == 0
            || !matches!(self.state, SessionState::Active)
            || self.flagged_count >= self.config.mines
        {
            return HintOutcome::Unavailable;
        }

        match advisor::find_safe_move(&self.board, &mut self.rng) {
            Some(coords) => {
                self.hints_remaining -= 1;
                log::debug!("hint at {:?}, {} charges left", coords, self.hints_remaining);
                HintOutcome::Granted(coords)
            }
            None => HintOutcome::Unavailable,
        }
    }

    /// Moves Ready to Active, recording the start time.
    fn mark_started(&mut self) {
        if matches!(self.state, SessionState::Ready) {
            let now = Utc::now();
            log::debug!("started at {}", now);
            self.started_at.replace(now);
            self.state = SessionState::Active;
        }
    }

    /// Terminal transition; repeated calls are no-ops.
    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        let now = Utc::now();
        self.ended_at.replace(now);
        log::debug!("{} at {}", if won { "won" } else { "lost" }, now);

        self.reveal_all_mines();
        // hints refresh per round, on game end as much as on reset
        self.hints_remaining = DEFAULT_HINTS;
    }

    /// Forced reveal of every mine, flags and all.
    fn reveal_all_mines(&mut self) {
        let (rows, cols) = self.board.size();
        for row in 0..rows {
            for col in 0..cols {
                let cell = self.board.cell_mut((row, col));
                if cell.is_mine {
                    cell.is_revealed = true;
                }
            }
        }
    }
}
