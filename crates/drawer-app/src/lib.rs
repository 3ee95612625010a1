//! Drawer replay
//!
//! Loads drawer options and a recorded gesture script, drives a drawer on
//! a simulated clock and reports every callback it makes.

pub mod cli;
pub mod replay;
pub mod script;

pub use cli::CliArgs;
pub use replay::{CallbackEvent, Replay, ReplaySummary};
pub use script::{Script, ScriptError, ScriptResult, Step};
