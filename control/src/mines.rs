use std::collections::BTreeMap;

use sapper_core::{Coord2, GridSize, Mine, MineId, MineLayout, RoverError};
use sapper_protocol::MineUpdate;

use crate::*;

/// Mine records keyed by id. At most one mine per cell.
#[derive(Clone, Debug, Default)]
pub struct MineRegistry {
    next_id: u32,
    mines: BTreeMap<MineId, Mine>,
}

impl MineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mines.is_empty()
    }

    pub fn get(&self, id: MineId) -> Result<&Mine> {
        self.mines.get(&id).ok_or(ControlError::UnknownMine(id))
    }

    /// Mines in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Mine> {
        self.mines.values()
    }

    pub fn find_at(&self, coords: Coord2) -> Option<&Mine> {
        self.iter().find(|mine| mine.coords == coords)
    }

    pub fn snapshot(&self) -> Vec<Mine> {
        self.mines.values().cloned().collect()
    }

    pub fn layout(&self, size: GridSize) -> Result<MineLayout> {
        let coords: Vec<Coord2> = self.iter().map(|mine| mine.coords).collect();
        Ok(MineLayout::from_mine_coords(size, &coords)?)
    }

    pub fn create(&mut self, size: GridSize, serial_no: String, coords: Coord2) -> Result<&Mine> {
        if serial_no.is_empty() {
            return Err(ControlError::EmptySerial);
        }
        self.check_free(size, coords, None)?;

        self.next_id += 1;
        let id = MineId::new(self.next_id);
        log::debug!("placing mine {id} ({serial_no:?}) at {coords:?}");

        self.mines.insert(id, Mine::new(id, serial_no, coords));
        self.get(id)
    }

    /// Applies every field of `update` or none of them.
    pub fn update(&mut self, size: GridSize, id: MineId, update: MineUpdate) -> Result<&Mine> {
        let current = self.get(id)?;
        let coords = (
            update.x.unwrap_or(current.coords.0),
            update.y.unwrap_or(current.coords.1),
        );
        if matches!(update.serial_no.as_deref(), Some("")) {
            return Err(ControlError::EmptySerial);
        }
        self.check_free(size, coords, Some(id))?;

        let mine = self
            .mines
            .get_mut(&id)
            .ok_or(ControlError::UnknownMine(id))?;
        mine.coords = coords;
        if let Some(serial_no) = update.serial_no {
            mine.serial_no = serial_no;
        }
        log::debug!("updated mine {id}: {:?} at {coords:?}", mine.serial_no);
        Ok(&*mine)
    }

    pub fn delete(&mut self, id: MineId) -> Result<Mine> {
        self.mines.remove(&id).ok_or(ControlError::UnknownMine(id))
    }

    pub fn remove_at(&mut self, coords: Coord2) -> Option<Mine> {
        let id = self.find_at(coords)?.id;
        self.mines.remove(&id)
    }

    /// Drops mines that fall outside `size`, returning them.
    pub fn retain_within(&mut self, size: GridSize) -> Vec<Mine> {
        let (kept, dropped): (BTreeMap<_, _>, BTreeMap<_, _>) = std::mem::take(&mut self.mines)
            .into_iter()
            .partition(|(_, mine)| size.contains(mine.coords));
        self.mines = kept;
        dropped.into_values().collect()
    }

    pub fn clear(&mut self) {
        self.mines.clear();
    }

    fn check_free(&self, size: GridSize, coords: Coord2, moving: Option<MineId>) -> Result<()> {
        if !size.contains(coords) {
            return Err(RoverError::InvalidCoords.into());
        }
        match self.find_at(coords) {
            Some(other) if Some(other.id) != moving => Err(ControlError::Occupied(coords)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(rows: u16, cols: u16) -> GridSize {
        GridSize::new(rows, cols).unwrap()
    }

    #[test]
    fn create_assigns_distinct_ids() {
        let mut mines = MineRegistry::new();
        let a = mines.create(size(3, 3), "A".into(), (0, 0)).unwrap().id;
        let b = mines.create(size(3, 3), "B".into(), (1, 1)).unwrap().id;

        assert_ne!(a, b);
        assert_eq!(mines.len(), 2);
        assert_eq!(mines.get(b).unwrap().serial_no, "B");
    }

    #[test]
    fn create_rejects_bad_placements() {
        let mut mines = MineRegistry::new();
        mines.create(size(2, 2), "A".into(), (1, 1)).unwrap();

        assert_eq!(
            mines.create(size(2, 2), "B".into(), (1, 1)).map(|m| m.id),
            Err(ControlError::Occupied((1, 1)))
        );
        assert_eq!(
            mines.create(size(2, 2), "B".into(), (2, 0)).map(|m| m.id),
            Err(ControlError::Rover(RoverError::InvalidCoords))
        );
        assert_eq!(
            mines.create(size(2, 2), String::new(), (0, 0)).map(|m| m.id),
            Err(ControlError::EmptySerial)
        );
        assert_eq!(mines.len(), 1);
    }

    #[test]
    fn update_is_all_or_nothing() {
        let mut mines = MineRegistry::new();
        let id = mines.create(size(3, 3), "A".into(), (0, 0)).unwrap().id;

        let bad = MineUpdate {
            serial_no: Some("Z".into()),
            x: Some(9),
            y: None,
        };
        assert!(mines.update(size(3, 3), id, bad).is_err());
        assert_eq!(mines.get(id).unwrap(), &Mine::new(id, "A", (0, 0)));

        let good = MineUpdate {
            serial_no: Some("Z".into()),
            x: Some(2),
            y: None,
        };
        let mine = mines.update(size(3, 3), id, good).unwrap();
        assert_eq!(mine, &Mine::new(id, "Z", (2, 0)));
    }

    #[test]
    fn update_in_place_is_not_a_collision() {
        let mut mines = MineRegistry::new();
        let id = mines.create(size(3, 3), "A".into(), (1, 2)).unwrap().id;

        let update = MineUpdate {
            x: Some(1),
            ..Default::default()
        };
        assert_eq!(mines.update(size(3, 3), id, update).unwrap().coords, (1, 2));
    }

    #[test]
    fn retain_within_drops_outside_mines() {
        let mut mines = MineRegistry::new();
        mines.create(size(4, 4), "A".into(), (0, 0)).unwrap();
        mines.create(size(4, 4), "B".into(), (3, 1)).unwrap();
        mines.create(size(4, 4), "C".into(), (1, 3)).unwrap();

        let dropped = mines.retain_within(size(2, 4));

        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].serial_no, "B");
        assert_eq!(mines.len(), 2);
    }

    #[test]
    fn remove_at_finds_mine_by_coords() {
        let mut mines = MineRegistry::new();
        mines.create(size(2, 2), "A".into(), (0, 1)).unwrap();

        assert_eq!(mines.remove_at((1, 1)), None);
        assert_eq!(mines.remove_at((0, 1)).unwrap().serial_no, "A");
        assert!(mines.is_empty());
    }
}
