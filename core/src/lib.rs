#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use command::*;
pub use engine::*;
pub use error::*;
pub use id::*;
pub use mine::*;
pub use position::*;
pub use tile::*;
pub use trace::*;
pub use types::*;

mod command;
mod engine;
mod error;
mod id;
mod mine;
mod position;
pub mod puzzle;
mod tile;
mod trace;
mod types;

/// Grid dimensions. Both axes are always at least one cell long.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(Coord, Coord)", into = "(Coord, Coord)")]
pub struct GridSize {
    rows: Coord,
    cols: Coord,
}

impl GridSize {
    pub const DEFAULT: Self = Self { rows: 10, cols: 10 };

    pub fn new(rows: Coord, cols: Coord) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(RoverError::InvalidDimensions);
        }
        Ok(Self { rows, cols })
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn as_coords(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn contains(&self, coords: Coord2) -> bool {
        coords.0 < self.rows && coords.1 < self.cols
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<(Coord, Coord)> for GridSize {
    type Error = RoverError;

    fn try_from((rows, cols): (Coord, Coord)) -> Result<Self> {
        Self::new(rows, cols)
    }
}

impl From<GridSize> for (Coord, Coord) {
    fn from(size: GridSize) -> Self {
        size.as_coords()
    }
}

/// Cell occupancy of a grid: `true` where a mine sits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
}

impl MineLayout {
    pub fn empty(size: GridSize) -> Self {
        Self {
            mine_mask: Array2::default(size.as_coords().to_nd_index()),
        }
    }

    pub fn from_mine_coords(size: GridSize, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);

        for &coords in mine_coords {
            let coords = layout.validate_coords(coords)?;
            layout[coords] = true;
        }

        Ok(layout)
    }

    pub fn from_mines(size: GridSize, mines: &[Mine]) -> Result<Self> {
        let coords: Vec<Coord2> = mines.iter().map(|mine| mine.coords).collect();
        Self::from_mine_coords(size, &coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(RoverError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mine_mask.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Removes the mine at `coords`, returning whether there was one.
    pub fn clear(&mut self, coords: Coord2) -> bool {
        core::mem::replace(&mut self[coords], false)
    }

    /// Rows of `'1'` (mine) and `'0'` (empty) cells.
    pub fn to_rows(&self) -> Vec<Vec<char>> {
        self.mine_mask
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|&is_mine| if is_mine { '1' } else { '0' })
                    .collect()
            })
            .collect()
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, (x, y): Coord2) -> &mut Self::Output {
        &mut self.mine_mask[(x as usize, y as usize)]
    }
}

/// Result of feeding one command to a [`RoverEngine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// A move that would have left the grid, absorbed in place.
    Blocked,
    Turned,
    /// Disarm on an empty cell.
    Idle,
    Disarmed,
    Destroyed,
}

impl StepOutcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn grid_size_rejects_zero_axis() {
        assert_eq!(GridSize::new(0, 3), Err(RoverError::InvalidDimensions));
        assert_eq!(GridSize::new(3, 0), Err(RoverError::InvalidDimensions));
        assert_eq!(GridSize::default().as_coords(), (10, 10));
    }

    #[test]
    fn layout_rejects_out_of_bounds_mine() {
        let size = GridSize::new(2, 2).unwrap();
        assert_eq!(
            MineLayout::from_mine_coords(size, &[(0, 0), (2, 0)]),
            Err(RoverError::InvalidCoords)
        );
    }

    #[test]
    fn layout_clear_reports_previous_state() {
        let size = GridSize::new(2, 3).unwrap();
        let mut layout = MineLayout::from_mine_coords(size, &[(1, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 1);
        assert_eq!(
            layout.to_rows(),
            vec![vec!['0', '0', '0'], vec!['0', '0', '1']]
        );
        assert!(layout.clear((1, 2)));
        assert!(!layout.clear((1, 2)));
        assert_eq!(layout.mine_count(), 0);
    }
}
