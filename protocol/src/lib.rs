//! JSON shapes exchanged with operators: map views, mine and rover records,
//! dispatch reports, and the request bodies that mutate them.

use sapper_core::{
    Coord, DisarmEvent, Execution, GridSize, Mine, MineId, MineLayout, RoverId, RoverStatus,
};
use serde::{Deserialize, Serialize};

pub const NOT_APPLICABLE: &str = "rover status not applicable";

/// `{"data": ...}` wrapper used by dispatch replies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapView {
    pub row: Coord,
    pub col: Coord,
    pub map: Vec<Vec<char>>,
}

impl From<&MineLayout> for MapView {
    fn from(layout: &MineLayout) -> Self {
        let (row, col) = layout.size();
        Self {
            row,
            col,
            map: layout.to_rows(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapUpdate {
    pub row: Coord,
    pub col: Coord,
}

impl Default for MapUpdate {
    fn default() -> Self {
        GridSize::default().into()
    }
}

impl From<GridSize> for MapUpdate {
    fn from(size: GridSize) -> Self {
        Self {
            row: size.rows(),
            col: size.cols(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineCreate {
    pub serial_no: String,
    pub x: Coord,
    pub y: Coord,
}

/// Partial mine update; absent fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Coord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Coord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineView {
    pub id: MineId,
    pub serial_no: String,
    pub x: Coord,
    pub y: Coord,
}

impl From<&Mine> for MineView {
    fn from(mine: &Mine) -> Self {
        Self {
            id: mine.id,
            serial_no: mine.serial_no.clone(),
            x: mine.coords.0,
            y: mine.coords.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverCreate {
    pub commands: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverView {
    pub rover_id: RoverId,
    pub commands: String,
    pub status: RoverStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisarmedMineView {
    pub pin: u64,
    pub hash: String,
    pub x: Coord,
    pub y: Coord,
}

impl From<&DisarmEvent> for DisarmedMineView {
    fn from(event: &DisarmEvent) -> Self {
        Self {
            pin: event.key,
            hash: event.digest.clone(),
            x: event.coords.0,
            y: event.coords.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchView {
    pub rover_map: Vec<Vec<char>>,
    pub rover: RoverView,
    pub disarmed_mines: Vec<DisarmedMineView>,
}

impl DispatchView {
    pub fn new(rover: RoverView, execution: &Execution) -> Self {
        Self {
            rover_map: execution.trace.to_rows(),
            rover,
            disarmed_mines: execution.disarmed.iter().map(Into::into).collect(),
        }
    }
}

/// Reply to a dispatch request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DispatchReply {
    Dispatched(DispatchView),
    Rejected(String),
}

impl DispatchReply {
    pub fn not_applicable() -> Self {
        Self::Rejected(NOT_APPLICABLE.to_owned())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Data::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::{CommandScript, execute};
    use serde_json::json;

    #[test]
    fn map_view_uses_cell_characters() {
        let size = GridSize::new(2, 2).unwrap();
        let layout = MineLayout::from_mine_coords(size, &[(0, 1)]).unwrap();

        let value = serde_json::to_value(MapView::from(&layout)).unwrap();

        assert_eq!(
            value,
            json!({"row": 2, "col": 2, "map": [["0", "1"], ["0", "0"]]})
        );
    }

    #[test]
    fn mine_update_fields_are_optional() {
        let update: MineUpdate = serde_json::from_str(r#"{"x": 3}"#).unwrap();

        assert_eq!(
            update,
            MineUpdate {
                x: Some(3),
                ..Default::default()
            }
        );
    }

    #[test]
    fn map_update_defaults_to_ten_by_ten() {
        let update: MapUpdate = serde_json::from_str(r#"{"row": 4, "col": 6}"#).unwrap();

        assert_eq!(update, MapUpdate { row: 4, col: 6 });
        assert_eq!(MapUpdate::default(), MapUpdate { row: 10, col: 10 });
    }

    #[test]
    fn mine_view_flattens_coordinates() {
        let mine = Mine::new(MineId::new(0x2a), "SN-001", (3, 1));

        let value = serde_json::to_value(MineView::from(&mine)).unwrap();

        assert_eq!(
            value,
            json!({"id": "0000002a", "serial_no": "SN-001", "x": 3, "y": 1})
        );
    }

    #[test]
    fn dispatch_reply_wraps_in_data() {
        let size = GridSize::new(1, 2).unwrap();
        let script = CommandScript::parse("LM").unwrap();
        let execution = execute(size, &[], &script).unwrap();
        let rover = RoverView {
            rover_id: RoverId::new(1),
            commands: script.to_string(),
            status: execution.status,
        };

        let reply = DispatchReply::Dispatched(DispatchView::new(rover, &execution));
        let value: serde_json::Value = serde_json::from_str(&reply.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({"data": {
                "rover_map": [["*", "*"]],
                "rover": {"rover_id": "00000001", "commands": "LM", "status": "Finished"},
                "disarmed_mines": [],
            }})
        );
    }

    #[test]
    fn rejection_is_a_bare_message() {
        assert_eq!(
            DispatchReply::not_applicable().to_json().unwrap(),
            r#"{"data":"rover status not applicable"}"#
        );
    }

    #[test]
    fn not_started_status_has_a_space() {
        assert_eq!(
            serde_json::to_string(&RoverStatus::NotStarted).unwrap(),
            r#""Not Started""#
        );
    }
}
