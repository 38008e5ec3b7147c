use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoverError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid dimensions must be above 0")]
    InvalidDimensions,
    #[error("Invalid command {found:?} at index {index}")]
    InvalidCommand { index: usize, found: char },
    #[error("No mine record at {0:?}")]
    MissingMineRecord(Coord2),
    #[error("Disarm puzzle exhausted its key space")]
    PuzzleExhausted,
    #[error("Rover already stopped, no new commands are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, RoverError>;
