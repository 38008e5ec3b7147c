use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoverStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    Moving,
    Finished,
    Eliminated,
}

impl RoverStatus {
    pub const fn is_dispatchable(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished | Self::Eliminated)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Moving => "Moving",
            Self::Finished => "Finished",
            Self::Eliminated => "Eliminated",
        }
    }
}

impl Default for RoverStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl core::fmt::Display for RoverStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mine neutralised during a dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisarmEvent {
    pub key: u64,
    pub digest: String,
    pub coords: Coord2,
}

/// Everything a finished dispatch hands back to its caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub status: RoverStatus,
    pub position: Position,
    pub trace: PathTrace,
    pub disarmed: Vec<DisarmEvent>,
}

/// Interprets rover commands over a private copy of the mine layout.
///
/// The mine list is only read: serial numbers are looked up by coordinate when a
/// disarm happens, and cleared mines are tracked in the engine's own layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RoverEngine<'m> {
    layout: MineLayout,
    mines: &'m [Mine],
    position: Position,
    trace: PathTrace,
    disarmed: Vec<DisarmEvent>,
    status: RoverStatus,
}

impl<'m> RoverEngine<'m> {
    pub fn new(size: GridSize, mines: &'m [Mine]) -> Result<Self> {
        let layout = MineLayout::from_mines(size, mines)?;
        let position = Position::default();
        let mut trace = PathTrace::new(size);
        trace.mark(position.coords, TraceCell::Visited);

        Ok(Self {
            layout,
            mines,
            position,
            trace,
            disarmed: Vec::new(),
            status: RoverStatus::Moving,
        })
    }

    pub fn status(&self) -> RoverStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn trace(&self) -> &PathTrace {
        &self.trace
    }

    pub fn disarmed(&self) -> &[DisarmEvent] {
        &self.disarmed
    }

    /// Applies one command at the current cell, then marks the trace where the rover ends up.
    pub fn step(&mut self, command: Command) -> Result<StepOutcome> {
        use Command::*;

        self.check_active()?;
        let here = self.position.coords;

        let mut dug = false;
        if self.layout.contains_mine(here) {
            if command != Disarm {
                log::debug!("rover detonated mine at {here:?} on {command:?}");
                self.status = RoverStatus::Eliminated;
                self.trace.mark(here, TraceCell::Destroyed);
                return Ok(StepOutcome::Destroyed);
            }
            self.disarm_at(here)?;
            dug = true;
        }

        let outcome = match command {
            Move => {
                if self.position.advance(self.layout.size()) {
                    StepOutcome::Moved
                } else {
                    StepOutcome::Blocked
                }
            }
            TurnLeft => {
                self.position.turn_left();
                StepOutcome::Turned
            }
            TurnRight => {
                self.position.turn_right();
                StepOutcome::Turned
            }
            Disarm if dug => StepOutcome::Disarmed,
            Disarm => StepOutcome::Idle,
        };

        let mark = if dug {
            TraceCell::Dig
        } else {
            TraceCell::Visited
        };
        self.trace.mark(self.position.coords, mark);
        log::trace!("{command:?} -> {outcome:?} at {:?}", self.position);

        Ok(outcome)
    }

    /// Runs `script` to the end or until the rover is destroyed.
    pub fn run(mut self, script: &CommandScript) -> Result<Execution> {
        for command in script.iter() {
            if self.step(command)?.is_terminal() {
                break;
            }
        }

        if !self.is_finished() {
            self.status = RoverStatus::Finished;
        }

        Ok(self.into_execution())
    }

    pub fn into_execution(self) -> Execution {
        Execution {
            status: self.status,
            position: self.position,
            trace: self.trace,
            disarmed: self.disarmed,
        }
    }

    fn disarm_at(&mut self, coords: Coord2) -> Result<()> {
        let mine = mine_at(self.mines, coords).ok_or(RoverError::MissingMineRecord(coords))?;
        let solution = puzzle::solve(&mine.serial_no)?;
        log::debug!(
            "disarmed mine {} at {coords:?} with key {}",
            mine.id,
            solution.key
        );

        self.layout.clear(coords);
        self.disarmed.push(DisarmEvent {
            key: solution.key,
            digest: solution.digest,
            coords,
        });
        Ok(())
    }

    fn check_active(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(RoverError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// Runs a full dispatch over `mines` on a grid of `size`.
pub fn execute(size: GridSize, mines: &[Mine], script: &CommandScript) -> Result<Execution> {
    RoverEngine::new(size, mines)?.run(script)
}
