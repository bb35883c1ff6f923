//! Closed-loop harness: a simulated plant, per-cycle metrics, and a step
//! response chart. Used by the demo binary, the benchmarks, and the tests;
//! the controller itself never depends on anything here.

use std::time::Duration;

use hdrhistogram::Histogram;
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// SIMULATED PLANT
// ============================================================================

/// A first-order process the demo loop regulates.
pub struct SimulatedPlant {
    rng: StdRng,
    value: f64,
    ambient: f64,
    // Tunables
    pub drift_rate: f64,
    pub noise_amplitude: f64,
}

impl SimulatedPlant {
    pub fn new(seed: u64, initial: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            value: initial,
            ambient: initial,
            drift_rate: 0.05,
            noise_amplitude: 0.0,
        }
    }

    /// Samples the plant, with seeded noise when `noise_amplitude` is set.
    pub fn measure(&mut self) -> f64 {
        if self.noise_amplitude == 0.0 {
            return self.value;
        }
        let noise = self.rng.gen_range(-self.noise_amplitude..self.noise_amplitude);
        self.value + noise
    }

    /// Advances the plant by `dt` seconds under the given correction.
    pub fn apply(&mut self, correction: f64, dt: f64) {
        // The correction integrates into the state, and the plant drifts
        // back toward ambient, so holding a setpoint takes sustained output.
        self.value += correction * dt;
        self.value += (self.ambient - self.value) * self.drift_rate * dt;
    }

    /// The true value, without measurement noise.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Shifts the true value, e.g. a sudden load change.
    pub fn inject_disturbance(&mut self, delta: f64) {
        self.value += delta;
    }
}

// ============================================================================
// LOOP METRICS
// ============================================================================

/// Per-cycle compute latency, summarized as quantiles.
pub struct LoopMetrics {
    compute_hist: Histogram<u64>,
    cycles: u64,
}

impl LoopMetrics {
    pub fn new() -> Self {
        Self {
            compute_hist: Histogram::new(3).unwrap(),
            cycles: 0,
        }
    }

    pub fn record_compute(&mut self, duration: Duration) {
        self.compute_hist.record(duration.as_nanos() as u64).ok();
        self.cycles += 1;
    }

    pub fn report(&self) -> LoopReport {
        LoopReport {
            cycles: self.cycles,
            compute_p50: Duration::from_nanos(self.compute_hist.value_at_quantile(0.5)),
            compute_p99: Duration::from_nanos(self.compute_hist.value_at_quantile(0.99)),
        }
    }
}

#[derive(Debug)]
pub struct LoopReport {
    pub cycles: u64,
    pub compute_p50: Duration,
    pub compute_p99: Duration,
}

// ============================================================================
// STEP TRACE
// ============================================================================

/// One `(time, measured, correction)` sample per loop cycle.
#[derive(Default)]
pub struct StepTrace {
    samples: Vec<(f64, f64, f64)>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, time: f64, measured: f64, correction: f64) {
        self.samples.push((time, measured, correction));
    }

    pub fn samples(&self) -> &[(f64, f64, f64)] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Renders the measured value against the setpoint over time.
pub fn render_step_chart(
    trace: &StepTrace,
    setpoint: f64,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let t_max = trace.samples().last().map(|s| s.0).unwrap_or(1.0);
    let mut y_min = setpoint;
    let mut y_max = setpoint;
    for &(_, measured, _) in trace.samples() {
        y_min = y_min.min(measured);
        y_max = y_max.max(measured);
    }
    let pad = ((y_max - y_min) * 0.1).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Step Response", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..t_max, (y_min - pad)..(y_max + pad))?;

    chart.configure_mesh().x_desc("Time (s)").y_desc("Value").draw()?;

    chart.draw_series(LineSeries::new(
        trace.samples().iter().map(|&(t, measured, _)| (t, measured)),
        &RED,
    ))?;
    chart.draw_series(LineSeries::new(
        vec![(0.0, setpoint), (t_max, setpoint)],
        &BLUE,
    ))?;
    root.present()?;
    Ok(())
}
