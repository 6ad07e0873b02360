use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid input")]
    InvalidToken,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cannot mark an open cell")]
    AlreadyOpen,
    #[error("Cannot open a marked cell")]
    AlreadyMarked,
    #[error("Cell already open, not enough marks around it to open its neighbors")]
    InsufficientMarks,
    #[error("Cannot mark more cells than there are mines")]
    TooManyMarks,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board sides must be between 1 and 30")]
    InvalidBoardSize,
    #[error("Board definition does not follow the expected format")]
    MalformedDefinition,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
