//! Bounded numeric interval used to cap the integral contribution.

use crate::error::PidError;

/// An immutable `(minimum, maximum)` pair with `minimum <= maximum`.
///
/// Validated once at construction and never mutated; to change the bounds
/// on a controller, build a new range and swap it in with
/// [`set_integrator_range`](crate::PIDController::set_integrator_range).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedRange {
    minimum: f64,
    maximum: f64,
}

impl BoundedRange {
    /// Creates a range, rejecting `minimum > maximum`.
    ///
    /// Either bound may be infinite for a half-open interval.
    pub fn new(minimum: f64, maximum: f64) -> Result<Self, PidError> {
        if minimum > maximum {
            return Err(PidError::InvalidRange { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// The `(-inf, +inf)` range, which clamps nothing.
    pub const fn unbounded() -> Self {
        Self {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
        }
    }

    /// Lower bound of the range.
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Upper bound of the range.
    pub fn maximum(&self) -> f64 {
        self.maximum
    }
}

impl Default for BoundedRange {
    fn default() -> Self {
        Self::unbounded()
    }
}
