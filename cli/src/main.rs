use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use sapper_control::ControlError;
use sapper_core::{RoverError, puzzle};
use sapper_protocol::{Data, DispatchReply};

mod mission;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a mission file and dispatch every rover in it, in order
    Run {
        mission: PathBuf,

        /// Print one JSON reply per rover instead of text
        #[arg(long)]
        json: bool,
    },
    /// Solve the disarm puzzle for a mine serial number
    Solve { serial_no: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    match args.command {
        Command::Run { mission, json } => run(&mission, json),
        Command::Solve { serial_no } => {
            let solution = puzzle::solve(&serial_no)?;
            println!("pin {} hash {}", solution.key, solution.digest);
            Ok(())
        }
    }
}

fn run(path: &Path, json: bool) -> Result<()> {
    let (mut control, rovers) = mission::Mission::load(path)?.into_control()?;
    log::info!(
        "mission {}: {}x{} grid, {} mines, {} rovers",
        path.display(),
        control.size().rows(),
        control.size().cols(),
        control.mines().len(),
        rovers.len()
    );

    for id in rovers {
        match control.dispatch(id) {
            Ok(outcome) if json => println!("{}", DispatchReply::from(&outcome).to_json()?),
            Ok(outcome) => print!("{}", render::outcome_text(id, &outcome)),
            // a bad command string only sinks its own rover
            Err(err @ ControlError::Rover(RoverError::InvalidCommand { .. })) => {
                log::warn!("rover {id} rejected: {err}");
                if json {
                    println!("{}", serde_json::to_string(&Data::new(err.to_string()))?);
                } else {
                    println!("rover {id}: rejected, {err}");
                }
            }
            Err(err) => return Err(err.into()),
        }
    }

    log::info!("{} mines left on the grid", control.mines().len());
    if json {
        print!("{}", render::field_json(&control)?);
    }
    Ok(())
}
