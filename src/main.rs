use std::error::Error;
use std::time::Instant;

use setpoint_pid::config::{self, ControllerConfig};
use setpoint_pid::sim::{render_step_chart, LoopMetrics, SimulatedPlant, StepTrace};

const PROFILE_PATH: &str = "config/controller.toml";
const CYCLES: u64 = 600;

fn main() -> Result<(), Box<dyn Error>> {
    println!("===========================================");
    println!("PID Closed-Loop Demo");
    println!("===========================================\n");

    // Load the tuning profile from file, falling back to a built-in demo
    // tuning when the file is missing or unreadable.
    let mut profile = config::load_or_default(PROFILE_PATH);
    if profile == ControllerConfig::default() {
        profile = demo_profile();
        println!("No profile at {}, using built-in demo tuning\n", PROFILE_PATH);
    }

    let mut pid = profile.build()?;
    let dt = pid.period();

    let mut plant = SimulatedPlant::new(42, 20.0);
    plant.noise_amplitude = 0.02;

    let mut metrics = LoopMetrics::new();
    let mut trace = StepTrace::new();
    let mut setpoint = 50.0;
    let mut reached_at: Option<u64> = None;

    println!(
        "Regulating plant from {:.1} toward setpoint {:.1}",
        plant.value(),
        setpoint
    );
    println!(
        "Tuning: kp={} ki={} kd={}, period {}s\n",
        pid.kp(),
        pid.ki(),
        pid.kd(),
        dt
    );

    for cycle in 0..CYCLES {
        // Setpoint change halfway through; the reset drops the stale error
        // history so the derivative does not spike against the old errors.
        if cycle == CYCLES / 2 {
            setpoint = 35.0;
            pid.reset();
            reached_at = None;
            println!("[cycle {:4}] setpoint -> {:.1}, controller reset", cycle, setpoint);
        }

        // A sudden load change late in the run
        if cycle == CYCLES * 3 / 4 {
            plant.inject_disturbance(-4.0);
            println!("[cycle {:4}] disturbance injected", cycle);
        }

        let measured = plant.measure();
        let start = Instant::now();
        let correction = pid.calculate(measured, setpoint);
        metrics.record_compute(start.elapsed());
        plant.apply(correction, dt);
        trace.push(cycle as f64 * dt, measured, correction);

        if reached_at.is_none() && pid.at_setpoint() {
            reached_at = Some(cycle);
            println!(
                "[cycle {:4}] at setpoint (error {:+.4})",
                cycle,
                pid.position_error()
            );
        }

        if cycle % 100 == 0 {
            println!(
                "[cycle {:4}] measured {:8.3}  error {:+8.3}  correction {:+8.3}",
                cycle,
                measured,
                pid.position_error(),
                correction
            );
        }
    }

    let report = metrics.report();
    println!("\n===========================================");
    println!("FINAL CLOSED-LOOP RESULTS");
    println!("===========================================");
    println!("Cycles: {}", report.cycles);
    println!("Final value: {:.3} (setpoint {:.1})", plant.value(), setpoint);
    match reached_at {
        Some(cycle) => println!("At setpoint since cycle {}", cycle),
        None => println!("Setpoint not reached"),
    }
    println!("Compute P50: {:?}, P99: {:?}", report.compute_p50, report.compute_p99);

    // Chart rendering is best-effort; a headless run must not fail the demo.
    let _ = render_step_chart(&trace, setpoint, "step_response.png");

    Ok(())
}

fn demo_profile() -> ControllerConfig {
    ControllerConfig {
        kp: 0.8,
        ki: 0.3,
        kd: 0.05,
        period: 0.05,
        position_tolerance: 0.25,
        velocity_tolerance: 2.0,
        integrator_min: -10.0,
        integrator_max: 10.0,
    }
}
