use sapper_core::{Coord2, MineId, RoverError, RoverId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error(transparent)]
    Rover(#[from] RoverError),
    #[error("No mine found with id {0}")]
    UnknownMine(MineId),
    #[error("No rover found with id {0}")]
    UnknownRover(RoverId),
    #[error("Mine serial number must not be empty")]
    EmptySerial,
    #[error("Mine already exists at {0:?}")]
    Occupied(Coord2),
    #[error("Rover {0} is not dispatching")]
    NotDispatching(RoverId),
}

pub type Result<T> = std::result::Result<T, ControlError>;
