//! Drawer configuration.
//!
//! Options use the camelCase names of the component's public surface so
//! an existing option object can be loaded as JSON unchanged. Options
//! that are no longer honoured are accepted and reported with a warning.

use crate::direction::Direction;
use crate::overlay::OverlayTarget;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Duration;

/// Displacement (px) past which a release closes the drawer.
pub const DEFAULT_CLOSE_THRESHOLD: f64 = 75.0;
/// Time the close animation keeps the panel mounted.
pub const DEFAULT_CLOSE_DELAY_MS: u64 = 300;
/// Space kept between the panel and the container edge when overscrolling.
pub const DEFAULT_OVERSCROLL_BUFFER: f64 = 20.0;
/// Scrim alpha while the drawer is open.
pub const DEFAULT_SCRIM_OPACITY: f64 = 0.6;

/// Options that used to configure the drawer and are now ignored.
pub const DEPRECATED_OPTIONS: &[&str] = &[
    "escapeClose",
    "overlayOpacity",
    "onRest",
    "maxNegativeScroll",
    "disableDrag",
    "scrollToClose",
    "spring",
    "kinetic",
    "animationSpring",
];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("Invalid option {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Drawer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawerConfig {
    /// Edge the drawer is attached to.
    pub direction: Direction,
    /// When false a drag release always snaps back.
    pub allow_close: bool,
    /// Never attach drag listeners; the drawer behaves as a plain modal.
    pub dont_apply_listeners: bool,
    /// Passed through to the rendering layer for the panel.
    pub modal_element_class: Option<String>,
    /// Passed through to the rendering layer for the scrim/container.
    pub container_element_class: Option<String>,
    /// Where the overlay is projected.
    pub parent_element: OverlayTarget,
    pub close_threshold: f64,
    pub close_delay_ms: u64,
    pub overscroll_buffer: f64,
    pub scrim_opacity: f64,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            allow_close: true,
            dont_apply_listeners: false,
            modal_element_class: None,
            container_element_class: None,
            parent_element: OverlayTarget::default(),
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            close_delay_ms: DEFAULT_CLOSE_DELAY_MS,
            overscroll_buffer: DEFAULT_OVERSCROLL_BUFFER,
            scrim_opacity: DEFAULT_SCRIM_OPACITY,
        }
    }
}

/// Wire form: known options plus whatever else the caller passed.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(flatten)]
    config: DrawerConfig,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

impl DrawerConfig {
    /// Create a configuration for `direction` with default options.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn with_allow_close(mut self, allow_close: bool) -> Self {
        self.allow_close = allow_close;
        self
    }

    pub fn with_dont_apply_listeners(mut self, dont_apply_listeners: bool) -> Self {
        self.dont_apply_listeners = dont_apply_listeners;
        self
    }

    pub fn with_parent_element(mut self, target: OverlayTarget) -> Self {
        self.parent_element = target;
        self
    }

    pub fn with_classes(
        mut self,
        container: impl Into<String>,
        modal: impl Into<String>,
    ) -> Self {
        self.container_element_class = Some(container.into());
        self.modal_element_class = Some(modal.into());
        self
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    /// Parse options from a JSON object.
    ///
    /// Deprecated options are logged and ignored; anything else that is
    /// not a known option is rejected.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        for key in raw.rest.keys() {
            if DEPRECATED_OPTIONS.contains(&key.as_str()) {
                log::warn!("Drawer option `{}` is deprecated and has no effect", key);
            } else {
                return Err(ConfigError::UnknownOption(key.clone()));
            }
        }
        raw.config.validate()?;
        Ok(raw.config)
    }

    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading drawer config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check numeric options for values the state machine cannot use.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.close_threshold.is_finite() || self.close_threshold < 0.0 {
            return Err(ConfigError::Invalid {
                name: "closeThreshold",
                reason: format!("expected a non-negative distance, got {}", self.close_threshold),
            });
        }
        if !self.overscroll_buffer.is_finite() || self.overscroll_buffer < 0.0 {
            return Err(ConfigError::Invalid {
                name: "overscrollBuffer",
                reason: format!("expected a non-negative distance, got {}", self.overscroll_buffer),
            });
        }
        if !(0.0..=1.0).contains(&self.scrim_opacity) {
            return Err(ConfigError::Invalid {
                name: "scrimOpacity",
                reason: format!("expected a value in 0..=1, got {}", self.scrim_opacity),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DrawerConfig::default();
        assert_eq!(config.direction, Direction::Bottom);
        assert!(config.allow_close);
        assert!(!config.dont_apply_listeners);
        assert_eq!(config.parent_element, OverlayTarget::Body);
        assert!((config.close_threshold - 75.0).abs() < f64::EPSILON);
        assert_eq!(config.close_delay(), Duration::from_millis(300));
        assert!((config.scrim_opacity - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_camel_case() {
        let config = DrawerConfig::from_json(
            r#"{
                "direction": "left",
                "allowClose": false,
                "modalElementClass": "modal",
                "containerElementClass": "drawer",
                "parentElement": { "element": "portal-root" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.direction, Direction::Left);
        assert!(!config.allow_close);
        assert_eq!(config.modal_element_class.as_deref(), Some("modal"));
        assert_eq!(config.container_element_class.as_deref(), Some("drawer"));
        assert_eq!(
            config.parent_element,
            OverlayTarget::Element("portal-root".to_string())
        );
    }

    #[test]
    fn test_deprecated_options_are_ignored() {
        let config =
            DrawerConfig::from_json(r#"{ "escapeClose": true, "kinetic": false, "spring": {} }"#)
                .unwrap();
        assert_eq!(config, DrawerConfig::default());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = DrawerConfig::from_json(r#"{ "wobble": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption(ref name) if name == "wobble"));
    }

    #[test]
    fn test_invalid_opacity_rejected() {
        let err = DrawerConfig::from_json(r#"{ "scrimOpacity": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "scrimOpacity", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "direction": "top", "closeDelayMs": 450 }}"#).unwrap();

        let config = DrawerConfig::load(file.path()).unwrap();
        assert_eq!(config.direction, Direction::Top);
        assert_eq!(config.close_delay(), Duration::from_millis(450));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DrawerConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
