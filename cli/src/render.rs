use std::fmt::Write;

use anyhow::Result;
use sapper_control::{Control, DispatchOutcome, DispatchReport};
use sapper_core::RoverId;
use sapper_protocol::{MapView, MineView};

pub fn outcome_text(id: RoverId, outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Dispatched(report) => report_text(report),
        DispatchOutcome::NotApplicable { status } => {
            format!("rover {id}: {status}, not dispatched\n")
        }
    }
}

pub fn report_text(report: &DispatchReport) -> String {
    let rover = &report.rover;
    let execution = &report.execution;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "rover {} [{}]: {} at {:?} facing {:?}",
        rover.id,
        rover.commands,
        rover.status,
        execution.position.coords,
        execution.position.facing
    );
    out.push_str(&execution.trace.to_string());
    for event in &execution.disarmed {
        let _ = writeln!(
            out,
            "  disarmed {:?} pin {} hash {}",
            event.coords, event.key, event.digest
        );
    }
    out
}

/// The grid and the mines still on it, one JSON document per line.
pub fn field_json(control: &Control) -> Result<String> {
    let map = MapView::from(&control.map()?);
    let mines: Vec<MineView> = control.mines().iter().map(MineView::from).collect();
    Ok(format!(
        "{}\n{}\n",
        serde_json::to_string(&map)?,
        serde_json::to_string(&mines)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::{GridSize, RoverStatus};

    #[test]
    fn report_lists_trace_and_disarms() {
        let mut control = Control::with_size(GridSize::new(2, 2).unwrap());
        control.place_mine("SN-001".into(), (1, 0)).unwrap();
        let id = control.create_rover("MD".into()).id;

        let outcome = control.dispatch(id).unwrap();
        let text = outcome_text(id, &outcome);

        assert_eq!(
            text,
            "rover 00000001 [MD]: Finished at (1, 0) facing South\n\
             *0\n\
             #0\n  \
             disarmed (1, 0) pin 14763 hash \
             0000fcd7fb919637c25ebb7cb077f649c7aecc520c97f52d1d56531313fb3573\n"
        );
    }

    #[test]
    fn not_applicable_is_one_line() {
        let outcome = DispatchOutcome::NotApplicable {
            status: RoverStatus::Eliminated,
        };
        assert_eq!(
            outcome_text(RoverId::new(2), &outcome),
            "rover 00000002: Eliminated, not dispatched\n"
        );
    }

    #[test]
    fn field_json_lists_map_then_remaining_mines() {
        let mut control = Control::with_size(GridSize::new(2, 3).unwrap());
        control.place_mine("SN-001".into(), (1, 0)).unwrap();
        control.place_mine("SN-002".into(), (0, 2)).unwrap();
        let id = control.create_rover("MD".into()).id;
        control.dispatch(id).unwrap();

        assert_eq!(
            field_json(&control).unwrap(),
            "{\"row\":2,\"col\":3,\"map\":[[\"0\",\"0\",\"1\"],[\"0\",\"0\",\"0\"]]}\n\
             [{\"id\":\"00000002\",\"serial_no\":\"SN-002\",\"x\":0,\"y\":2}]\n"
        );
    }
}
