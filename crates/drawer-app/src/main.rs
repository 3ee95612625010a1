//! Replay entry point.

use clap::Parser;
use drawer_app::{CliArgs, Replay, Script};
use drawer_core::DrawerConfig;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => DrawerConfig::load(path)?,
        None => DrawerConfig::default(),
    };
    let script = Script::load(&args.script)?;
    log::info!(
        "Replaying {} steps against a {} drawer",
        script.steps.len(),
        config.direction
    );

    let mut replay = Replay::new(config, args.frame());
    let summary = replay.run(&script);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for event in &summary.events {
            println!("{:>6}ms  {:?}", event.at_ms(), event);
        }
        println!(
            "{}ms elapsed, {} (mounted: {}), offset {}, listeners bound: {}",
            summary.elapsed_ms,
            summary.phase,
            summary.mounted,
            summary.offset,
            summary.listeners_bound
        );
    }
    Ok(())
}
