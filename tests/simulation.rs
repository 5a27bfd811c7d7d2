use coulomb::prelude::*;
use glam::DVec2;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pair(charge_a: f64, charge_b: f64) -> Simulation {
    let config = SimulationConfig::new(100.0, 100.0, 2)
        .with_strength(50.0)
        .with_softening(0.5);

    Simulation::with_particles(
        config,
        vec![
            Particle::new(DVec2::new(0.0, 0.0), charge_a),
            Particle::new(DVec2::new(10.0, 0.0), charge_b),
        ],
    )
    .unwrap()
}

#[test]
fn like_charges_repel() {
    init_logger();

    let mut simulation = pair(1.0, 1.0);
    simulation.step();

    let [a, b] = [simulation.particles()[0], simulation.particles()[1]];

    assert!(a.velocity.x < 0.0);
    assert!(b.velocity.x > 0.0);
    assert_eq!(a.velocity, -b.velocity);
    assert_eq!(a.velocity.y, 0.0);
}

#[test]
fn opposite_charges_attract() {
    init_logger();

    let mut simulation = pair(1.0, -1.0);
    simulation.step();

    let [a, b] = [simulation.particles()[0], simulation.particles()[1]];

    assert!(a.velocity.x > 0.0);
    assert!(b.velocity.x < 0.0);
    assert_eq!(a.velocity, -b.velocity);
}

#[test]
fn construction_places_particles_in_range() {
    init_logger();

    let config = SimulationConfig::new(300.0, 150.0, 1000)
        .with_charge_range(0.2, 0.4)
        .with_seed(5);
    let simulation = Simulation::new(config).unwrap();

    assert_eq!(simulation.particles().len(), 1000);
    assert_eq!(simulation.phase(), Phase::Constructed);

    for particle in simulation.particles() {
        assert!((0.0..300.0).contains(&particle.position.x));
        assert!((0.0..150.0).contains(&particle.position.y));
        assert!((0.2..=0.4).contains(&particle.charge.abs()));
        assert_eq!(particle.velocity, DVec2::ZERO);
    }
}

#[test]
fn ten_thousand_steps_stay_finite() {
    init_logger();

    for (method, boundary) in [
        (ForceMethod::BruteForce, BoundaryPolicy::Wrap),
        (ForceMethod::BarnesHut { theta: 0.5 }, BoundaryPolicy::Reflect),
    ] {
        let config = SimulationConfig::new(64.0, 48.0, 24)
            .with_strength(200.0)
            .with_softening(0.25)
            .with_initial_speed(20.0)
            .with_method(method)
            .with_boundary(boundary)
            .with_seed(11);
        let mut simulation = Simulation::new(config).unwrap();

        for _ in 0..100 {
            simulation.advance(100);

            for particle in simulation.particles() {
                assert!(particle.is_finite(), "{particle:?}");
                assert!(particle.position.cmpge(DVec2::ZERO).all());
                assert!(particle.position.cmplt(DVec2::new(64.0, 48.0)).all());
                assert!(particle.velocity.length() <= 200.0 * (1.0 + 1e-12));
            }
        }

        assert_eq!(simulation.step_count(), 10_000);
    }
}

#[test]
fn same_seed_same_run() {
    init_logger();

    for parallel in [false, true] {
        let config = SimulationConfig::new(400.0, 300.0, 300)
            .with_initial_speed(3.0)
            .with_method(ForceMethod::BarnesHut { theta: 0.6 })
            .with_parallel(parallel)
            .with_seed(1234);

        let mut first = Simulation::new(config.clone()).unwrap();
        let mut second = Simulation::new(config).unwrap();

        assert_eq!(first.particles(), second.particles());

        first.advance(60);
        second.advance(60);

        assert_eq!(first.particles(), second.particles());
    }
}

#[test]
fn neutral_particles_feel_no_force() {
    init_logger();

    let neutral = Particle::new(DVec2::new(50.0, 50.0), 0.0);
    let particles = vec![
        neutral,
        Particle::new(DVec2::new(52.0, 50.0), 1.0),
        Particle::new(DVec2::new(50.0, 47.0), -1.0),
        Particle::new(DVec2::new(20.0, 80.0), 0.5),
    ];

    for method in [ForceMethod::BruteForce, ForceMethod::BarnesHut { theta: 1.0 }] {
        let config = SimulationConfig::new(100.0, 100.0, 4).with_method(method);
        let mut simulation = Simulation::with_particles(config, particles.clone()).unwrap();

        simulation.advance(30);

        assert_eq!(simulation.particles()[0], neutral);
    }
}

#[test]
fn coincident_particles_stay_finite() {
    init_logger();

    let at = DVec2::new(25.0, 25.0);
    let config = SimulationConfig::new(50.0, 50.0, 3);
    let mut simulation = Simulation::with_particles(
        config,
        vec![
            Particle::new(at, 1.0),
            Particle::new(at, 1.0),
            Particle::new(at, -1.0),
        ],
    )
    .unwrap();

    simulation.advance(100);

    assert!(simulation.particles().iter().all(Particle::is_finite));
}

#[test]
fn featherweight_particles_stay_finite() {
    init_logger();

    let config = SimulationConfig::new(100.0, 100.0, 2).with_strength(1e10);
    let particles = vec![
        Particle::new(DVec2::new(10.0, 50.0), 1.0).with_mass(1e-308),
        Particle::new(DVec2::new(20.0, 50.0), 1.0).with_mass(1e-308),
    ];
    let mut simulation = Simulation::with_particles(config, particles.clone()).unwrap();

    simulation.step();

    assert!(simulation.particles().iter().all(Particle::is_finite));
    assert_eq!(simulation.particles(), &particles[..]);
}

#[test]
fn brute_force_conserves_momentum() {
    init_logger();

    let config = SimulationConfig::new(500.0, 500.0, 32).with_seed(8);
    let mut simulation = Simulation::new(config).unwrap();

    simulation.advance(100);

    let diagnostics = simulation.diagnostics();
    assert!(diagnostics.kinetic_energy > 0.0);
    assert!(
        diagnostics.momentum.length() < 1e-9,
        "momentum {}",
        diagnostics.momentum
    );
}

#[test]
fn reflected_particle_turns_back() {
    init_logger();

    let config = SimulationConfig::new(10.0, 10.0, 1)
        .with_boundary(BoundaryPolicy::Reflect)
        .with_time_step(0.5);
    let particle = Particle::new(DVec2::new(9.5, 5.0), 0.0).with_velocity(DVec2::new(2.0, 0.0));
    let mut simulation = Simulation::with_particles(config, vec![particle]).unwrap();

    simulation.step();

    let particle = simulation.particles()[0];
    assert_eq!(particle.velocity, DVec2::new(-2.0, 0.0));
    assert!(particle.position.x < 10.0);
}

#[test]
fn draw_points_are_castable() {
    init_logger();

    let config = SimulationConfig::new(80.0, 60.0, 10).with_seed(2);
    let mut simulation = Simulation::new(config).unwrap();
    simulation.step();

    let points: Vec<DrawPoint> = simulation.draw_points().collect();
    let floats: &[f32] = bytemuck::cast_slice(&points);

    assert_eq!(floats.len(), 50);
    assert!(points.iter().all(|p| (0.0..=1.0).contains(&p.color)));
}
