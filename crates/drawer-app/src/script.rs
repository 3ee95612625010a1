//! Gesture scripts: a recorded sequence of caller and platform actions.

use drawer_core::PointerEvent;
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Script loading errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Script has no steps")]
    Empty,
    #[error("Step {index}: {reason}")]
    InvalidStep { index: usize, reason: String },
}

/// Result type for script loading.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Caller sets `open = true`.
    Open,
    /// Caller sets `open = false`.
    Close,
    /// Platform pointer input.
    Pointer { event: PointerEvent },
    /// Let simulated time pass.
    Wait { ms: u64 },
    /// Size of the surface the overlay covers.
    Viewport { width: f64, height: f64 },
    /// Measured container and panel geometry.
    Layout { container: Rect, panel: Rect },
    /// Scroll anchor entered or left the viewport.
    Visibility { visible: bool },
    /// Click on the scrim.
    Backdrop,
}

/// A full script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Close the drawer whenever it requests to be closed, like a
    /// controlling parent would.
    #[serde(default = "default_respond_to_close")]
    pub respond_to_close: bool,
    pub steps: Vec<Step>,
}

fn default_respond_to_close() -> bool {
    true
}

impl Script {
    pub fn from_json(json: &str) -> ScriptResult<Self> {
        let script: Script = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> ScriptResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading gesture script from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> ScriptResult<()> {
        if self.steps.is_empty() {
            return Err(ScriptError::Empty);
        }
        for (index, step) in self.steps.iter().enumerate() {
            let reason = match step {
                Step::Viewport { width, height } if !(*width >= 0.0 && *height >= 0.0) => {
                    Some(format!("viewport {}x{} is not a size", width, height))
                }
                Step::Layout { container, panel }
                    if container.width() < 0.0 || container.height() < 0.0 =>
                {
                    Some(format!("container {:?} is inverted (panel {:?})", container, panel))
                }
                _ => None,
            };
            if let Some(reason) = reason {
                return Err(ScriptError::InvalidStep { index, reason });
            }
        }
        Ok(())
    }
}

impl Step {
    pub(crate) fn viewport_size(&self) -> Option<Size> {
        match *self {
            Step::Viewport { width, height } => Some(Size::new(width, height)),
            _ => None,
        }
    }
}
