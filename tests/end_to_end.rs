use acmd::prelude::*;
use acmd::utils::norm;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

const RADIUS: f64 = 10.0;

fn overdamped(seed: u64) -> Params {
    Params::new().with("mu", 1.0).with("seed", seed)
}

fn thermal(seed: u64) -> Params {
    overdamped(seed).with("temperature", 0.1)
}

fn sphere_simulation(integrator: Params) -> Simulation {
    let mut rng = ChaCha12Rng::seed_from_u64(42);
    let sphere = SphereSurface::new([0.0; 3], RADIUS).unwrap();
    let mut particles = Particles::new();
    particles.add_random_particles(&sphere, 100, 1, 0.5, &mut rng);
    let container = Container::from_lengths(30.0, 30.0, 30.0, false).unwrap();

    SimulationBuilder::new()
        .system(particles, container)
        .neighbor_list(2.4, 0.5)
        .unwrap()
        .pair_potential("soft", &Params::new().with("k", 10.0).with("a", 1.0))
        .unwrap()
        .constraint("sphere", &Params::new().with("r", RADIUS))
        .unwrap()
        .integrator("brownian_pos", &integrator)
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn particles_stay_on_the_sphere() {
    let mut simulation = sphere_simulation(overdamped(0));
    for _ in 0..1000 {
        simulation.step().unwrap();
        for pos in simulation.particles.positions() {
            assert!((norm(pos) - RADIUS).abs() <= 1e-9);
        }
        for director in simulation.particles.directors() {
            assert!((norm(director) - 1.0).abs() <= 1e-10);
        }
        let energy = simulation.potential_energy();
        assert!(energy.is_finite());
        assert!(energy >= 0.0);
    }
    let builds = simulation.neighbor_list().build_count();
    assert!(builds > 1);
    assert!(builds < 500, "neighbor list was rebuilt {} times", builds);
    assert_eq!(simulation.current_step(), 1000);
}

#[test]
fn identical_seeds_give_identical_trajectories() {
    let mut a = sphere_simulation(thermal(0));
    let mut b = sphere_simulation(thermal(0));
    a.run(200).unwrap();
    b.run(200).unwrap();
    assert_eq!(a.particles.positions(), b.particles.positions());
    assert_eq!(a.particles.directors(), b.particles.directors());

    let mut c = sphere_simulation(thermal(1));
    c.run(200).unwrap();
    assert_ne!(a.particles.positions(), c.particles.positions());
}

#[test]
fn pair_energy_matches_last_compute() {
    let mut simulation = sphere_simulation(overdamped(0));
    simulation.run(10).unwrap();
    let soft = simulation
        .compute_pair_potential_energy_of_type("soft")
        .unwrap();
    assert!(soft >= 0.0);
    assert_eq!(simulation.energies().len(), 1);
    assert!(simulation
        .compute_pair_potential_energy_of_type("lj")
        .is_err());
}
