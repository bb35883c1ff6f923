//! Discrete-time PID controller with validated tuning and setpoint tracking.

use crate::error::{Gain, PidError, Tolerance};
use crate::range::BoundedRange;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Sampling period in seconds assumed by [`PIDController::calculate`] when
/// the caller has not configured one.
pub const DEFAULT_PERIOD: f64 = 0.01;

/// Default bound on the position error for [`PIDController::at_setpoint`].
pub const DEFAULT_POSITION_TOLERANCE: f64 = 0.05;

// ============================================================================
// PID CONTROLLER
// ============================================================================

/// A discrete-time proportional-integral-derivative feedback controller.
///
/// The embedding control loop calls [`calculate`](Self::calculate) once per
/// iteration with the measured and desired values and applies the returned
/// correction to its actuator. The controller keeps no notion of wall-clock
/// time: each call either assumes the configured period elapsed or receives
/// the elapsed time explicitly via
/// [`calculate_with_dt`](Self::calculate_with_dt).
///
/// Gains, tolerances, and the period are validated on every assignment; a
/// rejected assignment returns a [`PidError`] and leaves the previous value
/// in place. The control path itself never fails: degenerate inputs (a zero
/// time step, non-finite measurements) flow through as IEEE-754 infinities
/// or NaN in the output, and interpreting those is the caller's job.
#[derive(Debug)]
pub struct PIDController {
    kp: f64,
    ki: f64,
    kd: f64,

    period: f64,
    position_tolerance: f64,
    velocity_tolerance: f64,
    integrator_range: BoundedRange,

    // Error state. NaN means "no sample yet": set at construction and by
    // reset, overwritten by the first calculate.
    position_error: f64,
    velocity_error: f64,
    total_error: f64,
}

impl PIDController {
    /// Creates a controller from the three gain coefficients.
    ///
    /// Each gain must be non-negative; the first negative one fails the
    /// construction with [`PidError::InvalidGain`] naming it. The period,
    /// tolerances, and integrator range start at their defaults (0.01 s,
    /// 0.05, `+inf`, unbounded) and the error history starts empty.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Result<Self, PidError> {
        check_gain(Gain::Proportional, kp)?;
        check_gain(Gain::Integral, ki)?;
        check_gain(Gain::Derivative, kd)?;

        Ok(Self {
            kp,
            ki,
            kd,
            period: DEFAULT_PERIOD,
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
            velocity_tolerance: f64::INFINITY,
            integrator_range: BoundedRange::unbounded(),
            position_error: f64::NAN,
            velocity_error: f64::NAN,
            total_error: 0.0,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Proportional gain.
    pub fn kp(&self) -> f64 {
        self.kp
    }

    /// Integral gain.
    pub fn ki(&self) -> f64 {
        self.ki
    }

    /// Derivative gain.
    pub fn kd(&self) -> f64 {
        self.kd
    }

    /// Nominal time step in seconds between `calculate` calls.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Largest position error still counted as on target.
    pub fn position_tolerance(&self) -> f64 {
        self.position_tolerance
    }

    /// Largest velocity error still counted as on target.
    pub fn velocity_tolerance(&self) -> f64 {
        self.velocity_tolerance
    }

    /// Bounds on the integral term's contribution to the output.
    pub fn integrator_range(&self) -> BoundedRange {
        self.integrator_range
    }

    /// Position error from the most recent iteration; NaN until the first
    /// `calculate` after construction or reset.
    pub fn position_error(&self) -> f64 {
        self.position_error
    }

    /// Velocity error from the most recent iteration; NaN until two samples
    /// have been seen.
    pub fn velocity_error(&self) -> f64 {
        self.velocity_error
    }

    // ------------------------------------------------------------------
    // Validated setters
    // ------------------------------------------------------------------

    /// Sets the proportional gain; rejects negative values.
    pub fn set_kp(&mut self, kp: f64) -> Result<(), PidError> {
        check_gain(Gain::Proportional, kp)?;
        self.kp = kp;
        Ok(())
    }

    /// Sets the integral gain; rejects negative values.
    ///
    /// Changing the gain does not touch the accumulated integral state, so
    /// the integral contribution `ki * accumulator` jumps proportionally on
    /// the next iteration.
    pub fn set_ki(&mut self, ki: f64) -> Result<(), PidError> {
        check_gain(Gain::Integral, ki)?;
        self.ki = ki;
        Ok(())
    }

    /// Sets the derivative gain; rejects negative values.
    pub fn set_kd(&mut self, kd: f64) -> Result<(), PidError> {
        check_gain(Gain::Derivative, kd)?;
        self.kd = kd;
        Ok(())
    }

    /// Sets the nominal time step in seconds; must be strictly positive.
    pub fn set_period(&mut self, period: f64) -> Result<(), PidError> {
        if period <= 0.0 {
            return Err(PidError::InvalidPeriod { value: period });
        }
        self.period = period;
        Ok(())
    }

    /// Sets the position tolerance; rejects negative values.
    pub fn set_position_tolerance(&mut self, tolerance: f64) -> Result<(), PidError> {
        check_tolerance(Tolerance::Position, tolerance)?;
        self.position_tolerance = tolerance;
        Ok(())
    }

    /// Sets the velocity tolerance; rejects negative values. `+inf`
    /// disables the velocity check entirely.
    pub fn set_velocity_tolerance(&mut self, tolerance: f64) -> Result<(), PidError> {
        check_tolerance(Tolerance::Velocity, tolerance)?;
        self.velocity_tolerance = tolerance;
        Ok(())
    }

    /// Replaces the integrator range. A [`BoundedRange`] is already ordered
    /// by construction, so the swap cannot fail.
    pub fn set_integrator_range(&mut self, range: BoundedRange) {
        self.integrator_range = range;
    }

    // ------------------------------------------------------------------
    // Control path
    // ------------------------------------------------------------------

    /// Runs one controller iteration, assuming the configured period
    /// elapsed since the previous one.
    pub fn calculate(&mut self, actual: f64, desired: f64) -> f64 {
        self.calculate_with_dt(actual, desired, self.period)
    }

    /// Runs one controller iteration with an explicit elapsed time `dt` in
    /// seconds and returns the correction to apply.
    ///
    /// The position error is `desired - actual`. The derivative term is
    /// suppressed on the first call after construction or
    /// [`reset`](Self::reset): with no previous error to difference
    /// against, the velocity error is left at NaN and contributes nothing.
    /// The integral accumulator only advances while the integral gain is
    /// nonzero; a zero gain freezes it in place rather than clearing it.
    /// The accumulator is clamped so that the integral contribution
    /// (`ki * accumulator`) stays within the integrator range.
    ///
    /// A `dt` of zero is not guarded: the derivative divides by it and the
    /// result carries the usual IEEE-754 infinity or NaN.
    pub fn calculate_with_dt(&mut self, actual: f64, desired: f64, dt: f64) -> f64 {
        let last_error = self.position_error;
        self.position_error = desired - actual;

        let mut derivative = 0.0;
        if !last_error.is_nan() {
            self.velocity_error = (self.position_error - last_error) / dt;
            derivative = self.kd * self.velocity_error;
        }

        if self.ki != 0.0 {
            // Bounds are pre-divided by ki so the clamp limits the actual
            // output contribution, ki * total_error.
            self.total_error = clamp(
                self.total_error + self.position_error * dt,
                self.integrator_range.minimum() / self.ki,
                self.integrator_range.maximum() / self.ki,
            );
        }

        self.kp * self.position_error + self.ki * self.total_error + derivative
    }

    /// Whether the most recent iteration landed within both tolerances.
    ///
    /// Both error values start at NaN and every comparison against NaN is
    /// false, so this reports `false` before the first `calculate`; with a
    /// finite velocity tolerance it stays `false` until a second sample
    /// gives the velocity error a value.
    pub fn at_setpoint(&self) -> bool {
        self.position_error.abs() <= self.position_tolerance
            && self.velocity_error.abs() <= self.velocity_tolerance
    }

    /// Clears the error history: both errors back to NaN, the integral
    /// accumulator to zero. Gains, tolerances, period, and integrator range
    /// are untouched, and the next `calculate` behaves exactly like the
    /// first one after construction.
    pub fn reset(&mut self) {
        self.position_error = f64::NAN;
        self.velocity_error = f64::NAN;
        self.total_error = 0.0;
    }
}

// ============================================================================
// VALIDATION HELPERS
// ============================================================================

fn check_gain(gain: Gain, value: f64) -> Result<(), PidError> {
    // NaN is never less than zero, so it passes.
    if value < 0.0 {
        return Err(PidError::InvalidGain { gain, value });
    }
    Ok(())
}

fn check_tolerance(tolerance: Tolerance, value: f64) -> Result<(), PidError> {
    if value < 0.0 {
        return Err(PidError::InvalidTolerance { tolerance, value });
    }
    Ok(())
}

// Three-way clamp that tolerates unordered or NaN bounds. `f64::clamp`
// panics in those cases, and the control path must not fail.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        return min;
    }
    if value > max {
        return max;
    }
    value
}
