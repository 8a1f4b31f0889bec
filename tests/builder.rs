use acmd::prelude::*;
use acmd::IntegratorState;
use approx::assert_relative_eq;

fn plane_particles() -> Particles {
    let mut particles = Particles::new();
    for (i, x) in [-1.0, 0.0, 1.5].into_iter().enumerate() {
        particles.push(Particle::new(i + 1, [x, 0.0, 0.3], [0.0, 1.0, 0.0], 0.5));
    }
    particles
}

fn plane_builder() -> SimulationBuilder<Constrained> {
    let container = Container::from_lengths(12.0, 12.0, 12.0, true).unwrap();
    SimulationBuilder::new()
        .timestep(0.005)
        .unwrap()
        .system(plane_particles(), container)
        .neighbor_list(2.0, 0.4)
        .unwrap()
        .pair_potential("lj", &Params::new().with("rcut", 2.0))
        .unwrap()
        .external_potential("gravity", &Params::new().with("g", 2.0))
        .unwrap()
        .constraint("plane", &Params::new().with("d", 1.0))
        .unwrap()
}

#[test]
fn constraint_projects_particles_when_set() {
    let builder = plane_builder();
    for pos in builder.particles().positions() {
        assert_relative_eq!(pos[2], 1.0);
    }
}

#[test]
fn configured_parameters_are_recorded() {
    let simulation = plane_builder()
        .integrator("brownian_pos", &Params::new().with("mu", 0.5))
        .unwrap()
        .build()
        .unwrap();
    let record = simulation.config_record();
    let has = |key: &str, value: &str| {
        record
            .iter()
            .any(|(k, v)| k.as_str() == key && v.as_str() == value)
    };
    assert!(has("neighbor_list.rcut", "2"));
    assert!(has("pair_potential.lj.rcut", "2"));
    assert!(has("external.gravity.g", "2"));
    assert!(has("constraint.plane.d", "1"));
    assert!(has("integrator.brownian_pos.mu", "0.5"));
    assert!(has("timestep", "0.005"));
    assert_relative_eq!(simulation.timestep(), 0.005);
}

#[test]
fn per_type_parameters_replace_previous_ones() {
    let mut simulation = plane_builder()
        .external_parameters("gravity", &Params::new().with("type", 2).with("g", 10.0))
        .unwrap()
        .external_parameters("gravity", &Params::new().with("type", 2))
        .unwrap()
        .integrator("brownian_pos", &Params::new())
        .unwrap()
        .build()
        .unwrap();
    // g of type 2 was replaced by the default 1, the others keep the global 2
    let energy = simulation
        .compute_external_potential_energy_of_type("gravity")
        .unwrap();
    assert_relative_eq!(energy, 2.0 + 1.0 + 2.0);
    simulation.step().unwrap();
    assert!(simulation
        .energies()
        .iter()
        .any(|(name, _)| name == "external.gravity"));
}

#[test]
fn disabled_integrators_do_not_move_particles() {
    let mut simulation = plane_builder()
        .integrator("brownian_pos", &Params::new())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        simulation.integrator_state("brownian_pos"),
        Some(IntegratorState::Ready)
    );
    simulation.disable_integrator("brownian_pos").unwrap();
    let before = simulation.particles.positions().to_vec();
    simulation.step().unwrap();
    assert_eq!(simulation.particles.positions(), before.as_slice());
    assert!(simulation.particles.ages.iter().all(|&age| age > 0.0));

    simulation.enable_integrator("brownian_pos").unwrap();
    simulation.step().unwrap();
    assert_ne!(simulation.particles.positions(), before.as_slice());
    assert!(simulation.disable_integrator("brownian_align").is_err());
}

#[test]
fn nematic_alignment_with_legacy_integrator() {
    let mut simulation = plane_builder()
        .pair_potential("polar_align", &Params::new().with("J", 1.0))
        .unwrap()
        .integrator(
            "brownian",
            &Params::new().with("nematic", "").with("tau", 0.05),
        )
        .unwrap()
        .build()
        .unwrap();
    simulation.run(50).unwrap();
    for (pos, director) in simulation
        .particles
        .positions()
        .iter()
        .zip(simulation.particles.directors())
    {
        assert_relative_eq!(pos[2], 1.0, epsilon = 1e-12);
        assert_relative_eq!(director[2], 0.0, epsilon = 1e-12);
    }
}

fn pair_on_plane(cutoff: f64) -> Result<Simulation, Error> {
    let mut particles = Particles::new();
    particles.push(Particle::new(1, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], 0.5));
    particles.push(Particle::new(1, [1.5, 0.0, 0.0], [1.0, 0.0, 0.0], 0.5));
    let container = Container::from_lengths(10.0, 10.0, 10.0, true).unwrap();
    SimulationBuilder::new()
        .system(particles, container)
        .neighbor_list(cutoff, 0.2)?
        .pair_potential("soft", &Params::new().with("k", 10.0).with("a", 2.0))?
        .constraint("plane", &Params::new())?
        .integrator("brownian_pos", &Params::new().with("v0", 0.0))?
        .build()
}

#[test]
fn neighbor_cutoff_must_cover_pair_range() {
    assert!(matches!(pair_on_plane(1.0), Err(Error::Config { .. })));

    let mut simulation = pair_on_plane(2.0).unwrap();
    simulation.step().unwrap();
    // U = k/2 (a - r)^2 at r = 1.5
    assert_relative_eq!(simulation.potential_energy(), 1.25);
    let positions = simulation.particles.positions();
    assert!(positions[0][0] < 0.0);
    assert!(positions[1][0] > 1.5);
}
