//! Runs a movement scenario for some ticks and reports what happened.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;
use clap::Parser as _;
use manyfmt::Refmt as _;

use voxmotion::physics::{MoveDetails, PhysicsConfig};
use voxmotion::time::Tick;
use voxmotion::util::ConciseDebug;
use voxmotion::world::EffectLog;

mod command_options;
use command_options::SimArgs;
mod logging;
mod scenario;

fn main() -> Result<(), anyhow::Error> {
    let SimArgs {
        scenario,
        ticks,
        physics,
        logging: logging_args,
    } = SimArgs::parse();

    logging::install(&logging_args)?;

    let mut setup = scenario.setup();
    if let Some(path) = physics {
        setup.world.set_physics(read_physics(&path)?);
    }
    log::info!("{scenario:?}: {}", setup.body.refmt(&ConciseDebug));

    let mut effects = EffectLog::new();
    let mut tick = Tick::ZERO;
    let mut stepped_up = 0;
    for _ in 0..ticks {
        let details = setup
            .step(&mut effects, tick)
            .with_context(|| format!("simulation crashed at {tick}"))?;
        if let MoveDetails::Moved {
            stepped_up: true, ..
        } = details
        {
            stepped_up += 1;
        }
        log::debug!(
            "{tick}: {} {}",
            details.refmt(&ConciseDebug),
            setup.body.refmt(&ConciseDebug)
        );
        tick = tick.next();
    }

    println!(
        "after {ticks} ticks ({:.2} s): {}",
        tick.seconds(),
        setup.body.refmt(&ConciseDebug)
    );
    println!(
        "fall distance {:.3}, walked {:.3}, stepped up {stepped_up} times",
        setup.body.fall_distance(),
        setup.body.walk_distance(),
    );
    for (_, cube, fall_distance) in effects.landings() {
        println!(
            "landed on {} after falling {fall_distance:.3}",
            cube.refmt(&ConciseDebug)
        );
    }
    for (_, sound) in effects.sounds() {
        println!("sound: {sound:?}");
    }
    Ok(())
}

/// Reads a JSON physics configuration file.
fn read_physics(path: &Path) -> Result<PhysicsConfig, anyhow::Error> {
    let file = File::open(path)
        .with_context(|| format!("failed to open physics file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse physics file {}", path.display()))
}
