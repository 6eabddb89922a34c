//! Gizmo configuration
//!
//! Tunables for every tool, serializable to and from RON files. All sections
//! default individually, so a file only needs to list what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::input::InputScript;
use crate::scene::GizmoSpace;

/// Translate tool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslateConfig {
    /// Camera distance multiplier for drag sensitivity
    pub distance_factor: f32,
    /// Space the per-axis offsets are applied in
    pub space: GizmoSpace,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            distance_factor: constants::TRANSLATE_DISTANCE_FACTOR,
            space: GizmoSpace::Local,
        }
    }
}

/// How the rotate tool picks its axes and whether its rings spring back
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RotateConvention {
    /// Axes right, down, back; rings return to their baseline on release
    #[default]
    Reverting,
    /// Axes right, up, forward; rings keep their accumulated orientation
    Accumulating,
}

/// Rotate tool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RotateConfig {
    /// Degrees per unit of pointer motion per second
    pub speed: f32,
    pub convention: RotateConvention,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            speed: constants::ROTATION_SPEED,
            convention: RotateConvention::default(),
        }
    }
}

/// Scale tool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScaleConfig {
    /// Scale units per unit of pointer motion per second
    pub speed: f32,
    /// Floor for the target's per-axis scale
    pub min_axis_scale: f32,
    /// The center handle stops at baseline / this value
    pub center_floor_divisor: f32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            speed: constants::SCALE_SPEED,
            min_axis_scale: constants::MIN_AXIS_SCALE,
            center_floor_divisor: constants::CENTER_SCALE_FLOOR_DIVISOR,
        }
    }
}

/// View tool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Seconds during which a second snap is ignored
    pub snap_cooldown_secs: f64,
    /// Degrees per unit of pointer motion per second for free orbit
    pub orbit_speed: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            snap_cooldown_secs: constants::SNAP_COOLDOWN_SECS,
            orbit_speed: constants::ORBIT_SPEED,
        }
    }
}

/// Picking settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickConfig {
    /// Layer gizmo colliders are placed on
    pub gizmo_layer: u32,
    /// Name fragment that marks plane sub-handles
    pub plane_marker: String,
    /// Picking camera field of view in degrees
    pub fov_degrees: f32,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            gizmo_layer: constants::GIZMO_LAYER,
            plane_marker: constants::PLANE_HANDLE_MARKER.to_string(),
            fov_degrees: 60.0,
        }
    }
}

/// Complete gizmo configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GizmoConfig {
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub rotate: RotateConfig,
    #[serde(default)]
    pub scale: ScaleConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub pick: PickConfig,
}

impl GizmoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values that would make a tool degenerate
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("translate.distance_factor", self.translate.distance_factor),
            ("rotate.speed", self.rotate.speed),
            ("scale.speed", self.scale.speed),
            ("scale.min_axis_scale", self.scale.min_axis_scale),
            ("scale.center_floor_divisor", self.scale.center_floor_divisor),
            ("view.orbit_speed", self.view.orbit_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.view.snap_cooldown_secs.is_finite() && self.view.snap_cooldown_secs >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "view.snap_cooldown_secs must not be negative, got {}",
                self.view.snap_cooldown_secs
            )));
        }
        let fov = self.pick.fov_degrees;
        if !(constants::MIN_FOV_DEGREES..=constants::MAX_FOV_DEGREES).contains(&fov) {
            return Err(ConfigError::Invalid(format!(
                "pick.fov_degrees must be within {}..={}, got {fov}",
                constants::MIN_FOV_DEGREES,
                constants::MAX_FOV_DEGREES
            )));
        }
        if self.pick.gizmo_layer >= 32 {
            return Err(ConfigError::Invalid(format!(
                "pick.gizmo_layer must be below 32, got {}",
                self.pick.gizmo_layer
            )));
        }
        if self.pick.plane_marker.is_empty() {
            return Err(ConfigError::Invalid(
                "pick.plane_marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Save config to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load and validate config from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: GizmoConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl InputScript {
    /// Load a recorded input script
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }
}

/// Config-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
