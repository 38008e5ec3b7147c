use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::*;

/// A placed mine. The serial number feeds the disarm puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mine {
    pub id: MineId,
    pub serial_no: String,
    pub coords: Coord2,
}

impl Mine {
    pub fn new(id: MineId, serial_no: impl Into<String>, coords: Coord2) -> Self {
        Self {
            id,
            serial_no: serial_no.into(),
            coords,
        }
    }
}

/// First mine in `mines` sitting at `coords`.
pub fn mine_at(mines: &[Mine], coords: Coord2) -> Option<&Mine> {
    mines.iter().find(|mine| mine.coords == coords)
}
