//! A discrete-time PID feedback controller.
//!
//! [`PIDController`] turns a measured and a desired value into a corrective
//! output, once per control-loop iteration. The embedding system owns the
//! loop, the sampling cadence, and whatever actuator consumes the output;
//! the controller just does the arithmetic and remembers the error history
//! between calls. [`BoundedRange`] caps how much the integral term may
//! contribute. Tuning comes from code or from a TOML profile ([`config`]),
//! and [`sim`] hosts the closed-loop harness behind the demo binary, the
//! benchmarks, and the convergence tests.

pub mod config;
pub mod controller;
pub mod error;
pub mod range;
pub mod sim;

pub use config::{ConfigError, ControllerConfig};
pub use controller::PIDController;
pub use error::{Gain, PidError, Tolerance};
pub use range::BoundedRange;
