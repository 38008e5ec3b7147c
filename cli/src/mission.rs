use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sapper_control::Control;
use sapper_core::{GridSize, RoverId};
use sapper_protocol::{MapUpdate, MineCreate, RoverCreate};
use serde::Deserialize;

/// A mission file: one grid, the mines on it, and the rovers to send in order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Mission {
    #[serde(default)]
    pub grid: MapUpdate,
    #[serde(default)]
    pub mines: Vec<MineCreate>,
    #[serde(default)]
    pub rovers: Vec<RoverCreate>,
}

impl Mission {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading mission file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("loading mission {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the registries and returns the rover ids in file order.
    pub fn into_control(self) -> Result<(Control, Vec<RoverId>)> {
        let MapUpdate { row, col } = self.grid;
        let size = GridSize::new(row, col).with_context(|| format!("grid {row}x{col}"))?;
        let mut control = Control::with_size(size);

        for mine in self.mines {
            let coords = (mine.x, mine.y);
            control
                .place_mine(mine.serial_no, coords)
                .with_context(|| format!("placing mine at {coords:?}"))?;
        }

        let rovers = self
            .rovers
            .into_iter()
            .map(|rover| control.create_rover(rover.commands).id)
            .collect();

        Ok((control, rovers))
    }
}
