use serde::{Deserialize, Serialize};

use crate::*;

/// Cardinal direction a rover is facing. South points towards increasing rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Facing {
    /// Counter-clockwise: South -> East -> North -> West -> South.
    pub const fn turn_left(self) -> Self {
        use Facing::*;
        match self {
            South => East,
            East => North,
            North => West,
            West => South,
        }
    }

    /// Clockwise: South -> West -> North -> East -> South.
    pub const fn turn_right(self) -> Self {
        use Facing::*;
        match self {
            South => West,
            West => North,
            North => East,
            East => South,
        }
    }

    /// Row/column delta of a single forward step.
    pub const fn step(self) -> (i8, i8) {
        use Facing::*;
        match self {
            South => (1, 0),
            North => (-1, 0),
            West => (0, -1),
            East => (0, 1),
        }
    }

    pub const fn as_char(self) -> char {
        use Facing::*;
        match self {
            North => 'N',
            South => 'S',
            East => 'E',
            West => 'W',
        }
    }
}

impl Default for Facing {
    fn default() -> Self {
        Self::South
    }
}

/// Transient rover position, reset for every dispatch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub coords: Coord2,
    pub facing: Facing,
}

impl Position {
    pub const fn new(coords: Coord2, facing: Facing) -> Self {
        Self { coords, facing }
    }

    /// Moves one cell forward, returns `false` and stays put when that would leave `bounds`.
    pub fn advance(&mut self, bounds: Coord2) -> bool {
        match apply_delta(self.coords, self.facing.step(), bounds) {
            Some(next) => {
                self.coords = next;
                true
            }
            None => false,
        }
    }

    pub fn turn_left(&mut self) {
        self.facing = self.facing.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.facing = self.facing.turn_right();
    }
}
