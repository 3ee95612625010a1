//! Command-line argument parsing for the replay tool

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Default simulated frame length.
const DEFAULT_FRAME_MS: u64 = 16;

/// Replay a recorded gesture script against a drawer
#[derive(Parser, Debug)]
#[command(
    name = "drawer-replay",
    version,
    about = "Replay a gesture script against a drawer"
)]
pub struct CliArgs {
    /// Gesture script (JSON)
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Drawer options (JSON); defaults apply when omitted
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Simulated frame length in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_FRAME_MS)]
    pub frame_ms: u64,

    /// Print the callback log as JSON instead of one line per event
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}
