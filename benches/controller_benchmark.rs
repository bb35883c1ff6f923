use criterion::{criterion_group, criterion_main, Criterion};
use setpoint_pid::sim::SimulatedPlant;
use setpoint_pid::PIDController;

fn benchmark_calculate(c: &mut Criterion) {
    let mut pid = PIDController::new(0.5, 0.1, 0.05).unwrap();
    c.bench_function("pid_calculate", |b| b.iter(|| pid.calculate(48.0, 50.0)));
}

fn benchmark_closed_loop_cycle(c: &mut Criterion) {
    let mut pid = PIDController::new(0.5, 0.1, 0.05).unwrap();
    let dt = pid.period();
    let mut plant = SimulatedPlant::new(42, 30.0);
    plant.noise_amplitude = 0.1;

    c.bench_function("closed_loop_cycle", |b| {
        b.iter(|| {
            let measured = plant.measure();
            let correction = pid.calculate(measured, 50.0);
            plant.apply(correction, dt);
        })
    });
}

criterion_group!(benches, benchmark_calculate, benchmark_closed_loop_cycle);
criterion_main!(benches);
