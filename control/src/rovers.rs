use std::collections::BTreeMap;

use sapper_core::{RoverId, RoverStatus};
use sapper_protocol::RoverView;

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rover {
    pub id: RoverId,
    /// Raw command string as submitted; only validated when dispatched.
    pub commands: String,
    pub status: RoverStatus,
}

impl From<&Rover> for RoverView {
    fn from(rover: &Rover) -> Self {
        Self {
            rover_id: rover.id,
            commands: rover.commands.clone(),
            status: rover.status,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RoverRegistry {
    next_id: u32,
    rovers: BTreeMap<RoverId, Rover>,
}

impl RoverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rovers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rovers.is_empty()
    }

    pub fn get(&self, id: RoverId) -> Result<&Rover> {
        self.rovers.get(&id).ok_or(ControlError::UnknownRover(id))
    }

    pub(crate) fn get_mut(&mut self, id: RoverId) -> Result<&mut Rover> {
        self.rovers
            .get_mut(&id)
            .ok_or(ControlError::UnknownRover(id))
    }

    /// Rovers in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Rover> {
        self.rovers.values()
    }

    pub fn create(&mut self, commands: String) -> &Rover {
        self.next_id += 1;
        let id = RoverId::new(self.next_id);
        log::debug!("created rover {id} with commands {commands:?}");

        self.rovers.entry(id).or_insert(Rover {
            id,
            commands,
            status: RoverStatus::NotStarted,
        })
    }

    pub fn delete(&mut self, id: RoverId) -> Result<Rover> {
        self.rovers.remove(&id).ok_or(ControlError::UnknownRover(id))
    }

    /// Replaces the commands of an idle rover.
    ///
    /// Only `NotStarted` and `Finished` rovers accept new commands; the status
    /// itself is left alone. Returns `None` for any other status.
    pub fn update_commands(&mut self, id: RoverId, commands: String) -> Result<Option<&Rover>> {
        let rover = self.get_mut(id)?;
        if !matches!(rover.status, RoverStatus::NotStarted | RoverStatus::Finished) {
            log::info!("rover {id} is {}, keeping its commands", rover.status);
            return Ok(None);
        }

        rover.commands = commands;
        Ok(Some(&*rover))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rovers_are_not_started() {
        let mut rovers = RoverRegistry::new();
        let id = rovers.create("MMR".into()).id;

        let rover = rovers.get(id).unwrap();
        assert_eq!(rover.status, RoverStatus::NotStarted);
        assert_eq!(rover.commands, "MMR");
    }

    #[test]
    fn update_only_when_idle() {
        let mut rovers = RoverRegistry::new();
        let id = rovers.create("M".into()).id;

        assert_eq!(
            rovers.update_commands(id, "L".into()).unwrap().map(|r| r.commands.clone()),
            Some("L".to_owned())
        );

        rovers.get_mut(id).unwrap().status = RoverStatus::Eliminated;
        assert_eq!(rovers.update_commands(id, "R".into()).unwrap(), None);
        assert_eq!(rovers.get(id).unwrap().commands, "L");

        rovers.get_mut(id).unwrap().status = RoverStatus::Finished;
        assert!(rovers.update_commands(id, "R".into()).unwrap().is_some());
        assert_eq!(rovers.get(id).unwrap().status, RoverStatus::Finished);
    }

    #[test]
    fn delete_unknown_rover_fails() {
        let mut rovers = RoverRegistry::new();
        let id = rovers.create(String::new()).id;

        assert!(rovers.delete(id).is_ok());
        assert_eq!(rovers.delete(id), Err(ControlError::UnknownRover(id)));
        assert!(rovers.is_empty());
    }

    #[test]
    fn view_carries_status_name() {
        let mut rovers = RoverRegistry::new();
        let rover = rovers.create("D".into());

        let view = RoverView::from(rover);
        assert_eq!(view.status, RoverStatus::NotStarted);
        assert_eq!(view.commands, "D");
    }
}
