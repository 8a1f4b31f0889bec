use acmd::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

fn run() -> Result<(), Error> {
    let mut rng = ChaCha12Rng::seed_from_u64(1);
    let sphere = SphereSurface::new([0.0, 0.0, 0.0], 10.0)?;
    let mut particles = Particles::new();
    particles.add_random_particles(&sphere, 200, 1, 0.5, &mut rng);

    let container = Container::from_lengths(30.0, 30.0, 30.0, false)?;

    let mut simulation = SimulationBuilder::new()
        .timestep(0.01)?
        .system(particles, container)
        .neighbor_list(2.4, 0.5)?
        .pair_potential("soft", &Params::new().with("k", 10.0).with("a", 1.0))?
        .pair_potential("polar_align", &Params::new().with("J", 0.5).with("a", 2.0))?
        .constraint("sphere", &Params::new().with("r", 10.0))?
        .integrator(
            "brownian_pos",
            &Params::new().with("mu", 1.0).with("v0", 0.5).with("seed", 3),
        )?
        .integrator(
            "brownian_align",
            &Params::new().with("nu", 0.1).with("mur", 1.0).with("seed", 4),
        )?
        .population(
            "random",
            &Params::new()
                .with("freq", 100)
                .with("division_rate", 0.05)
                .with("death_rate", 0.01)
                .with("seed", 5),
        )?
        .build()?;

    for (key, value) in simulation.config_record() {
        println!("{} = {}", key, value);
    }
    for block in 0..10 {
        simulation.run(100)?;
        let energies: Vec<String> = simulation
            .energies()
            .iter()
            .map(|(name, e)| format!("{}={:.4}", name, e))
            .collect();
        println!(
            "step {:5}  particles {:4}  {}",
            (block + 1) * 100,
            simulation.particles.len(),
            energies.join("  ")
        );
    }
    println!(
        "neighbor list builds: {}",
        simulation.neighbor_list().build_count()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
