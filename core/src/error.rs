use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum GameError {
    #[error("Cell index out of range")]
    InvalidCell,
    #[error("Cell is already occupied")]
    CellOccupied,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
