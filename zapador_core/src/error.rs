use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    InvalidCoords,
    #[error("Mine count must leave at least one safe cell")]
    TooManyMines,
    #[error("Unknown difficulty preset")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
