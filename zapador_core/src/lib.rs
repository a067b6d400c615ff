use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use session::*;
pub use types::*;

pub mod advisor;
pub mod generator;

mod board;
mod error;
mod session;
mod types;

/// Board dimensions and mine count for one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    /// First-click exclusion needs at least one mine-free cell.
    pub fn validate(&self) -> Result<()> {
        if self.mines.saturating_add(1) > self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Named presets from the page's difficulty selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Baby,
    Tiny,
    Small,
    Easy,
    Medium,
    Challenging,
    Hard,
    Expert,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 9] = [
        Self::Baby,
        Self::Tiny,
        Self::Small,
        Self::Easy,
        Self::Medium,
        Self::Challenging,
        Self::Hard,
        Self::Expert,
        Self::Master,
    ];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Baby => GameConfig::new_unchecked(2, 2, 1),
            Tiny => GameConfig::new_unchecked(3, 3, 2),
            Small => GameConfig::new_unchecked(4, 4, 4),
            Easy => GameConfig::new_unchecked(5, 5, 6),
            Medium => GameConfig::new_unchecked(6, 6, 9),
            Challenging => GameConfig::new_unchecked(7, 7, 13),
            Hard => GameConfig::new_unchecked(8, 8, 18),
            Expert => GameConfig::new_unchecked(9, 9, 23),
            Master => GameConfig::new_unchecked(10, 10, 30),
        }
    }

    pub const fn as_str(self) -> &'static str {
        use Difficulty::*;
        match self {
            Baby => "baby",
            Tiny => "tiny",
            Small => "small",
            Easy => "easy",
            Medium => "medium",
            Challenging => "challenging",
            Hard => "hard",
            Expert => "expert",
            Master => "master",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl core::str::FromStr for Difficulty {
    type Err = GameError;

    fn from_str(key: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str() == key)
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the board.
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of a reveal command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

/// Outcome of a hint request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    Unavailable,
    Granted(Coord2),
}

impl HintOutcome {
    /// Whether this outcome could have caused an update to the display.
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn preset_table_matches_the_page() {
        let expected = [
            (Difficulty::Baby, 2, 2, 1),
            (Difficulty::Tiny, 3, 3, 2),
            (Difficulty::Small, 4, 4, 4),
            (Difficulty::Easy, 5, 5, 6),
            (Difficulty::Medium, 6, 6, 9),
            (Difficulty::Challenging, 7, 7, 13),
            (Difficulty::Hard, 8, 8, 18),
            (Difficulty::Expert, 9, 9, 23),
            (Difficulty::Master, 10, 10, 30),
        ];

        for (difficulty, rows, cols, mines) in expected {
            let config = difficulty.config();
            assert_eq!((config.rows, config.cols, config.mines), (rows, cols, mines));
            // every preset leaves room for the first-click exclusion
            config.validate().unwrap();
        }
    }

    #[test]
    fn preset_keys_round_trip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(difficulty.as_str()), Ok(difficulty));
        }
        assert_eq!(
            Difficulty::from_str("nightmare"),
            Err(GameError::UnknownDifficulty)
        );
    }

    #[test]
    fn config_validation_requires_a_safe_cell() {
        assert!(GameConfig::new(2, 2, 3).is_ok());
        assert_eq!(GameConfig::new(2, 2, 4), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new(0, 5, 0), Err(GameError::TooManyMines));
    }

    #[test]
    fn outcome_update_flags() {
        assert!(!MarkOutcome::NoChange.has_update());
        assert!(MarkOutcome::Changed.has_update());
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Won.has_update());
        assert!(RevealOutcome::HitMine.is_terminal());
        assert!(!RevealOutcome::Revealed.is_terminal());
        assert!(HintOutcome::Granted((0, 0)).has_update());
        assert!(!HintOutcome::Unavailable.has_update());
    }
}
