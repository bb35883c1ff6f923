//! TOML-backed controller tuning profiles.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::controller::{PIDController, DEFAULT_PERIOD, DEFAULT_POSITION_TOLERANCE};
use crate::error::PidError;
use crate::range::BoundedRange;

// ============================================================================
// CONFIG ERRORS
// ============================================================================

/// Failure to read or parse a profile file.
///
/// A file that parses but carries an out-of-range value fails later, in
/// [`ControllerConfig::build`], with the controller's own [`PidError`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse profile: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// CONTROLLER CONFIG
// ============================================================================

/// A controller tuning profile.
///
/// Any missing key takes the controller's default, so a profile only needs
/// the fields it actually tunes. `inf` and `-inf` are valid TOML floats and
/// cover the unbounded tolerance and integrator bounds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub period: f64,
    pub position_tolerance: f64,
    pub velocity_tolerance: f64,
    pub integrator_min: f64,
    pub integrator_max: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            period: DEFAULT_PERIOD,
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
            velocity_tolerance: f64::INFINITY,
            integrator_min: f64::NEG_INFINITY,
            integrator_max: f64::INFINITY,
        }
    }
}

impl ControllerConfig {
    /// Parses a profile from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a profile file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Builds a controller from this profile.
    ///
    /// Every field goes through the controller's validated constructor and
    /// setters, so a profile cannot smuggle in a value the API rejects; the
    /// first violation is returned.
    pub fn build(&self) -> Result<PIDController, PidError> {
        let mut pid = PIDController::new(self.kp, self.ki, self.kd)?;
        pid.set_period(self.period)?;
        pid.set_position_tolerance(self.position_tolerance)?;
        pid.set_velocity_tolerance(self.velocity_tolerance)?;
        pid.set_integrator_range(BoundedRange::new(self.integrator_min, self.integrator_max)?);
        Ok(pid)
    }
}

/// Loads a profile, falling back to the defaults when the file is missing
/// or does not parse.
pub fn load_or_default(path: impl AsRef<Path>) -> ControllerConfig {
    match std::fs::read_to_string(path) {
        Ok(text) => toml::from_str(&text).unwrap_or_default(),
        Err(_) => ControllerConfig::default(),
    }
}
