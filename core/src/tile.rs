use serde::{Deserialize, Serialize};

/// What happened at a cell during one dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceCell {
    Unvisited,
    Visited,
    Dig,
    Destroyed,
}

impl TraceCell {
    pub const fn as_char(self) -> char {
        use TraceCell::*;
        match self {
            Unvisited => '0',
            Visited => '*',
            Dig => '#',
            Destroyed => 'X',
        }
    }

    pub const fn is_visited(self) -> bool {
        !matches!(self, Self::Unvisited)
    }
}

impl Default for TraceCell {
    fn default() -> Self {
        Self::Unvisited
    }
}
