use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// A single rover instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// `M`: one cell forward, absorbed at the grid edge.
    Move,
    /// `L`
    TurnLeft,
    /// `R`
    TurnRight,
    /// `D`: disarm the mine under the rover, if any.
    Disarm,
}

impl Command {
    pub const fn as_char(self) -> char {
        use Command::*;
        match self {
            Move => 'M',
            TurnLeft => 'L',
            TurnRight => 'R',
            Disarm => 'D',
        }
    }
}

impl TryFrom<char> for Command {
    type Error = char;

    fn try_from(c: char) -> core::result::Result<Self, char> {
        use Command::*;
        match c {
            'M' => Ok(Move),
            'L' => Ok(TurnLeft),
            'R' => Ok(TurnRight),
            'D' => Ok(Disarm),
            other => Err(other),
        }
    }
}

/// Validated command sequence. Either every character parses or nothing runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandScript {
    commands: Vec<Command>,
}

impl CommandScript {
    pub fn parse(source: &str) -> Result<Self> {
        let commands = source
            .chars()
            .enumerate()
            .map(|(index, c)| {
                Command::try_from(c).map_err(|found| RoverError::InvalidCommand { index, found })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        self.commands.iter().copied()
    }
}

impl FromStr for CommandScript {
    type Err = RoverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<Command>> for CommandScript {
    fn from(commands: Vec<Command>) -> Self {
        Self { commands }
    }
}

impl fmt::Display for CommandScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        self.iter().try_for_each(|c| f.write_char(c.as_char()))
    }
}
