//! Validation errors raised at configuration time.
//!
//! Every error here comes from an assignment or construction that violated
//! a precondition; the offending field keeps its previous value. The
//! control-path operations (`calculate`, `at_setpoint`, `reset`) never
//! return errors — degenerate numeric inputs surface as IEEE-754 special
//! values instead.

use thiserror::Error;

// ============================================================================
// PARAMETER NAMES
// ============================================================================

/// Names the gain coefficient that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gain {
    Proportional,
    Integral,
    Derivative,
}

impl std::fmt::Display for Gain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gain::Proportional => write!(f, "proportional"),
            Gain::Integral => write!(f, "integral"),
            Gain::Derivative => write!(f, "derivative"),
        }
    }
}

/// Names the tolerance that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tolerance {
    Position,
    Velocity,
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tolerance::Position => write!(f, "position"),
            Tolerance::Velocity => write!(f, "velocity"),
        }
    }
}

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

/// A rejected controller or range assignment.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum PidError {
    /// A range was constructed with its minimum above its maximum.
    #[error("range minimum {minimum} is greater than maximum {maximum}")]
    InvalidRange { minimum: f64, maximum: f64 },

    /// A gain was assigned a negative value.
    #[error("{gain} gain must be non-negative, got {value}")]
    InvalidGain { gain: Gain, value: f64 },

    /// A tolerance was assigned a negative value.
    #[error("{tolerance} tolerance must be non-negative, got {value}")]
    InvalidTolerance { tolerance: Tolerance, value: f64 },

    /// The sampling period was assigned a non-positive value.
    #[error("period must be positive, got {value}")]
    InvalidPeriod { value: f64 },
}
