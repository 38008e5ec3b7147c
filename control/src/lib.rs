//! Operator-facing registries and rover dispatch.
//!
//! [`Control`] owns the grid size, the mine registry and the rover registry.
//! A dispatch snapshots the grid and mines, runs the engine on that snapshot,
//! and then applies the result: the rover's terminal status is stored and
//! every disarmed mine is removed from the registry.

use sapper_core::{
    CommandScript, Coord, Coord2, Execution, GridSize, Mine, MineId, MineLayout, RoverId,
    RoverStatus, execute,
};
use sapper_protocol::{DispatchReply, DispatchView, MineUpdate, RoverView};

pub use error::*;
pub use mines::*;
pub use rovers::*;

mod error;
mod mines;
mod rovers;

#[derive(Clone, Debug, Default)]
pub struct Control {
    size: GridSize,
    mines: MineRegistry,
    rovers: RoverRegistry,
}

/// Everything a dispatch needs, detached from the registries.
#[derive(Clone, Debug)]
pub struct DispatchTicket {
    rover: RoverId,
    size: GridSize,
    mines: Vec<Mine>,
    script: CommandScript,
}

impl DispatchTicket {
    pub fn rover(&self) -> RoverId {
        self.rover
    }

    /// Runs the engine. Holds no reference to the registries.
    pub fn run(&self) -> sapper_core::Result<Execution> {
        execute(self.size, &self.mines, &self.script)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DispatchReport {
    pub rover: Rover,
    pub execution: Execution,
    /// Registry records removed because the rover disarmed them.
    pub removed: Vec<Mine>,
}

impl From<&DispatchReport> for DispatchView {
    fn from(report: &DispatchReport) -> Self {
        DispatchView::new(RoverView::from(&report.rover), &report.execution)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DispatchOutcome {
    Dispatched(DispatchReport),
    /// The rover was not in `NotStarted`; nothing changed.
    NotApplicable { status: RoverStatus },
}

impl From<&DispatchOutcome> for DispatchReply {
    fn from(outcome: &DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Dispatched(report) => DispatchReply::Dispatched(report.into()),
            DispatchOutcome::NotApplicable { .. } => DispatchReply::not_applicable(),
        }
    }
}

/// Either a ticket to run or the reason there is nothing to run.
#[derive(Clone, Debug)]
pub enum DispatchStart {
    Ready(DispatchTicket),
    NotApplicable { status: RoverStatus },
}

impl Control {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(size: GridSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn mines(&self) -> &MineRegistry {
        &self.mines
    }

    pub fn rovers(&self) -> &RoverRegistry {
        &self.rovers
    }

    /// Current occupancy of the grid.
    pub fn map(&self) -> Result<MineLayout> {
        self.mines.layout(self.size)
    }

    /// Changes the grid dimensions, keeping every mine that still fits.
    ///
    /// Mines left outside the new bounds are removed and returned.
    pub fn resize(&mut self, rows: Coord, cols: Coord) -> Result<Vec<Mine>> {
        let size = GridSize::new(rows, cols)?;
        let dropped = self.mines.retain_within(size);
        for mine in &dropped {
            log::warn!(
                "mine {} at {:?} is outside the {rows}x{cols} grid, removing it",
                mine.id,
                mine.coords
            );
        }
        self.size = size;
        Ok(dropped)
    }

    /// Back to an empty 10x10 grid. Rovers are kept.
    pub fn reset(&mut self) {
        self.size = GridSize::default();
        self.mines.clear();
    }

    pub fn place_mine(&mut self, serial_no: String, coords: Coord2) -> Result<&Mine> {
        self.mines.create(self.size, serial_no, coords)
    }

    pub fn update_mine(&mut self, id: MineId, update: MineUpdate) -> Result<&Mine> {
        self.mines.update(self.size, id, update)
    }

    pub fn delete_mine(&mut self, id: MineId) -> Result<Mine> {
        self.mines.delete(id)
    }

    pub fn create_rover(&mut self, commands: String) -> &Rover {
        self.rovers.create(commands)
    }

    pub fn update_rover(&mut self, id: RoverId, commands: String) -> Result<Option<&Rover>> {
        self.rovers.update_commands(id, commands)
    }

    pub fn delete_rover(&mut self, id: RoverId) -> Result<Rover> {
        self.rovers.delete(id)
    }

    /// Validates the rover's commands and marks it `Moving`.
    ///
    /// An invalid command string is rejected before the status changes.
    pub fn begin_dispatch(&mut self, id: RoverId) -> Result<DispatchStart> {
        let size = self.size;
        let mines = self.mines.snapshot();
        let rover = self.rovers.get_mut(id)?;

        if !rover.status.is_dispatchable() {
            log::info!("rover {id} is {}, not dispatching", rover.status);
            return Ok(DispatchStart::NotApplicable {
                status: rover.status,
            });
        }

        let script = CommandScript::parse(&rover.commands)?;
        rover.status = RoverStatus::Moving;
        log::debug!("dispatching rover {id} with {} commands", script.len());

        Ok(DispatchStart::Ready(DispatchTicket {
            rover: id,
            size,
            mines,
            script,
        }))
    }

    /// Puts a `Moving` rover back to `NotStarted` without applying any result.
    ///
    /// Takes the id rather than the ticket so a host that lost its ticket can
    /// still release the rover. A ticket for an aborted rover is refused by
    /// [`Control::complete_dispatch`].
    pub fn abort_dispatch(&mut self, id: RoverId) -> Result<&Rover> {
        let rover = self.rovers.get_mut(id)?;
        if rover.status != RoverStatus::Moving {
            return Err(ControlError::NotDispatching(id));
        }

        log::warn!("dispatch of rover {id} aborted");
        rover.status = RoverStatus::NotStarted;
        Ok(&*rover)
    }

    /// Stores the outcome of a ticket run and removes the mines it disarmed.
    ///
    /// A failed run puts the rover back to `NotStarted` and returns the error.
    pub fn complete_dispatch(
        &mut self,
        ticket: DispatchTicket,
        result: sapper_core::Result<Execution>,
    ) -> Result<DispatchReport> {
        let execution = match result {
            Ok(execution) => execution,
            Err(err) => {
                log::error!("dispatch of rover {} failed: {err}", ticket.rover);
                self.abort_dispatch(ticket.rover)?;
                return Err(err.into());
            }
        };

        let rover = self.rovers.get_mut(ticket.rover)?;
        if rover.status != RoverStatus::Moving {
            return Err(ControlError::NotDispatching(ticket.rover));
        }

        rover.status = execution.status;
        let rover = rover.clone();

        let removed = execution
            .disarmed
            .iter()
            .filter_map(|event| self.mines.remove_at(event.coords))
            .collect();

        log::info!(
            "rover {} {} at {:?} after disarming {} mines",
            rover.id,
            rover.status,
            execution.position.coords,
            execution.disarmed.len()
        );

        Ok(DispatchReport {
            rover,
            execution,
            removed,
        })
    }

    /// Runs a rover's commands to completion.
    pub fn dispatch(&mut self, id: RoverId) -> Result<DispatchOutcome> {
        match self.begin_dispatch(id)? {
            DispatchStart::Ready(ticket) => {
                let result = ticket.run();
                self.complete_dispatch(ticket, result)
                    .map(DispatchOutcome::Dispatched)
            }
            DispatchStart::NotApplicable { status } => Ok(DispatchOutcome::NotApplicable { status }),
        }
    }
}
