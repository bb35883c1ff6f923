use setpoint_pid::sim::SimulatedPlant;
use setpoint_pid::PIDController;

#[test]
fn disturbance_moves_the_plant() {
    let mut plant = SimulatedPlant::new(1, 20.0);
    let before = plant.measure();
    plant.inject_disturbance(5.0);
    let after = plant.measure();
    assert!((after - before).abs() > 1.0);
}

#[test]
fn measurements_vary_with_noise() {
    let mut plant = SimulatedPlant::new(42, 20.0);
    plant.noise_amplitude = 0.5;

    let mut values: Vec<f64> = Vec::new();
    for _ in 0..100 {
        values.push(plant.measure());
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(max - min > 0.1, "Measurements should carry noise");
}

#[test]
fn same_seed_gives_same_noise() {
    let mut a = SimulatedPlant::new(42, 20.0);
    let mut b = SimulatedPlant::new(42, 20.0);
    a.noise_amplitude = 0.5;
    b.noise_amplitude = 0.5;

    for _ in 0..50 {
        assert_eq!(a.measure(), b.measure());
    }
}

#[test]
fn controller_recovers_from_disturbance() {
    let mut pid = PIDController::new(0.8, 0.2, 0.05).unwrap();
    pid.set_period(0.1).unwrap();
    pid.set_position_tolerance(0.1).unwrap();
    let mut plant = SimulatedPlant::new(7, 50.0);

    // Settle at the setpoint, then knock the plant away from it
    for _ in 0..100 {
        let correction = pid.calculate(plant.measure(), 50.0);
        plant.apply(correction, 0.1);
    }
    plant.inject_disturbance(-8.0);

    for _ in 0..200 {
        let correction = pid.calculate(plant.measure(), 50.0);
        plant.apply(correction, 0.1);
    }

    assert!(
        (plant.value() - 50.0).abs() < 0.5,
        "Controller should rehold the setpoint after a disturbance, got {}",
        plant.value()
    );
    assert!(pid.at_setpoint());
}
