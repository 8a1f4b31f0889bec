//! Configuration of a [`Simulation`].
//!
//! The builder moves through three states. Potentials and the neighbor list
//! need particles and a box ([`WithSystem`]); integrators and population
//! controllers additionally need a constraint ([`Constrained`]). Calls made
//! out of order do not compile.

use std::marker::PhantomData;

use crate::{
    constraint::{Constraint, ConstraintTrait},
    integrators::Integrator,
    population::Population,
    registry::Registry,
    utils::KeyedVec,
    Container, Error, NeighborList, Params, Particles, Potential, Simulation,
};

pub const DEFAULT_TIMESTEP: f64 = 0.01;
pub const DEFAULT_CUTOFF: f64 = 3.0;
pub const DEFAULT_PADDING: f64 = 0.5;

/// No particles or box yet
#[derive(Debug)]
pub struct NoSystem;
/// Particles and box are set
#[derive(Debug)]
pub struct WithSystem;
/// Particles, box and constraint are set
#[derive(Debug)]
pub struct Constrained;

/// States in which particles and a box are available
pub trait HasSystem {}
impl HasSystem for WithSystem {}
impl HasSystem for Constrained {}

pub struct SimulationBuilder<S> {
    registry: Registry,
    timestep: f64,
    particles: Particles,
    container: Option<Container>,
    constraint: Option<Constraint>,
    potential: Potential,
    neighbor_list: Option<NeighborList>,
    integrators: KeyedVec<String, Integrator>,
    populations: KeyedVec<String, Population>,
    config_record: Vec<(String, String)>,
    state: PhantomData<S>,
}

impl Default for SimulationBuilder<NoSystem> {
    fn default() -> Self {
        Self::new()
    }
}
impl SimulationBuilder<NoSystem> {
    pub fn new() -> Self {
        Self::with_registry(Registry::default())
    }
    /// Start from a custom registry of component constructors
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            timestep: DEFAULT_TIMESTEP,
            particles: Particles::new(),
            container: None,
            constraint: None,
            potential: Potential::new(),
            neighbor_list: None,
            integrators: KeyedVec::new(),
            populations: KeyedVec::new(),
            config_record: Vec::new(),
            state: PhantomData,
        }
    }
    /// Set the time step. Integrators and population controllers read it at
    /// construction, so it can only be set before the system is defined.
    pub fn timestep(mut self, dt: f64) -> Result<Self, Error> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(Error::InvalidParameter {
                context: "simulation".into(),
                key: "timestep".into(),
                value: dt.to_string(),
            });
        }
        log::info!("Setting time step to {}.", dt);
        self.timestep = dt;
        Ok(self)
    }
    /// Define the particles and the box holding them
    pub fn system(self, particles: Particles, container: Container) -> SimulationBuilder<WithSystem> {
        log::info!("System with {} particles defined.", particles.len());
        let mut builder = self.transition::<WithSystem>();
        builder.record("box.periodic", container.is_periodic());
        builder.record("box.lengths", format!("{:?}", container.lengths()));
        builder.particles = particles;
        builder.container = Some(container);
        builder
    }
}

impl<S> SimulationBuilder<S> {
    fn transition<T>(self) -> SimulationBuilder<T> {
        SimulationBuilder {
            registry: self.registry,
            timestep: self.timestep,
            particles: self.particles,
            container: self.container,
            constraint: self.constraint,
            potential: self.potential,
            neighbor_list: self.neighbor_list,
            integrators: self.integrators,
            populations: self.populations,
            config_record: self.config_record,
            state: PhantomData,
        }
    }
    fn record(&mut self, key: &str, value: impl ToString) {
        self.config_record.push((key.to_string(), value.to_string()));
    }
    pub fn get_timestep(&self) -> f64 {
        self.timestep
    }
    pub fn config_record(&self) -> &[(String, String)] {
        &self.config_record
    }
}

impl<S: HasSystem> SimulationBuilder<S> {
    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    /// Configure the neighbor list. Cutoff and padding must be positive.
    pub fn neighbor_list(mut self, cutoff: f64, pad: f64) -> Result<Self, Error> {
        if self.neighbor_list.is_some() {
            log::warn!("Neighbor list has already been defined. Replacing it.");
        }
        if !(pad > 0.0) {
            return Err(Error::InvalidParameter {
                context: "neighbor list".into(),
                key: "pad".into(),
                value: pad.to_string(),
            });
        }
        self.neighbor_list = Some(NeighborList::new(cutoff, pad)?);
        log::info!(
            "Neighbor list with cutoff {} and padding {} defined.",
            cutoff,
            pad
        );
        self.record("neighbor_list.rcut", cutoff);
        self.record("neighbor_list.pad", pad);
        Ok(self)
    }

    pub fn pair_potential(mut self, name: &str, params: &Params) -> Result<Self, Error> {
        if self.neighbor_list.is_none() {
            log::warn!(
                "Neighbor list has not been defined before the pair potential {}. \
                 Creating one with default cutoff {} and padding {}.",
                name,
                DEFAULT_CUTOFF,
                DEFAULT_PADDING
            );
            self = self.neighbor_list(DEFAULT_CUTOFF, DEFAULT_PADDING)?;
        }
        let potential = self.registry.pair_potential(name, params)?;
        self.potential.add_pair_potential(name, potential);
        self.echo(&format!("pair_potential.{}", name), params);
        Ok(self)
    }
    pub fn pair_parameters(mut self, name: &str, params: &Params) -> Result<Self, Error> {
        self.potential.set_pair_parameters(name, params)?;
        self.check_ranges()?;
        self.echo(&format!("pair_param.{}", name), params);
        Ok(self)
    }
    pub fn external_potential(mut self, name: &str, params: &Params) -> Result<Self, Error> {
        let potential = self.registry.external_potential(name, params)?;
        self.potential.add_external_potential(name, potential);
        self.echo(&format!("external.{}", name), params);
        Ok(self)
    }
    pub fn external_parameters(mut self, name: &str, params: &Params) -> Result<Self, Error> {
        self.potential.set_external_parameters(name, params)?;
        self.echo(&format!("external_param.{}", name), params);
        Ok(self)
    }

    fn check_ranges(&self) -> Result<(), Error> {
        match &self.neighbor_list {
            Some(nlist) => self
                .potential
                .check_ranges(nlist.cutoff(), self.particles.max_radius()),
            None => Ok(()),
        }
    }
    fn echo(&mut self, prefix: &str, params: &Params) {
        self.config_record.extend(params.echo(prefix));
    }
    fn container_ref(&self) -> Result<&Container, Error> {
        self.container.as_ref().ok_or(Error::MissingPrerequisite {
            what: "configuration",
            missing: "a box",
        })
    }
}

impl SimulationBuilder<WithSystem> {
    /// Confine the particles to a manifold. Every particle is projected onto
    /// it immediately.
    pub fn constraint(
        mut self,
        name: &str,
        params: &Params,
    ) -> Result<SimulationBuilder<Constrained>, Error> {
        let constraint = self.registry.constraint(name, params)?;
        log::info!(
            "Enforcing constraint {} on all {} particles.",
            name,
            self.particles.len()
        );
        constraint.enforce_all(&mut self.particles)?;
        self.echo(&format!("constraint.{}", name), params);
        self.constraint = Some(constraint);
        Ok(self.transition())
    }
}

impl SimulationBuilder<Constrained> {
    pub fn integrator(mut self, name: &str, params: &Params) -> Result<Self, Error> {
        if self.potential.is_empty() {
            log::error!("Integrator {} requires a potential to be defined first.", name);
            return Err(Error::MissingPrerequisite {
                what: "integrator",
                missing: "a potential",
            });
        }
        let integrator = self.registry.integrator(name, params, self.timestep)?;
        if self.integrators.insert(name.to_string(), integrator).is_some() {
            log::warn!("Integrator {} has already been added. Replacing it.", name);
        }
        self.echo(&format!("integrator.{}", name), params);
        Ok(self)
    }
    pub fn population(mut self, name: &str, params: &Params) -> Result<Self, Error> {
        let population = self.registry.population(name, params, self.timestep)?;
        if self.populations.insert(name.to_string(), population).is_some() {
            log::warn!("Population {} has already been added. Replacing it.", name);
        }
        self.echo(&format!("population.{}", name), params);
        Ok(self)
    }

    pub fn build(mut self) -> Result<Simulation, Error> {
        if self.integrators.is_empty() {
            return Err(Error::MissingPrerequisite {
                what: "simulation",
                missing: "an integrator",
            });
        }
        let container = self.container_ref()?.clone();
        let constraint = self.constraint.take().ok_or(Error::MissingPrerequisite {
            what: "integrator",
            missing: "a constraint",
        })?;
        let neighbor_list = match self.neighbor_list.take() {
            Some(nlist) => nlist,
            None => NeighborList::new(DEFAULT_CUTOFF, DEFAULT_PADDING)?,
        };
        self.potential
            .check_ranges(neighbor_list.cutoff(), self.particles.max_radius())?;
        self.record("timestep", self.timestep);
        Ok(Simulation::new(
            self.particles,
            container,
            constraint,
            self.potential,
            neighbor_list,
            self.integrators,
            self.populations,
            self.timestep,
            self.config_record,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Particle, SphereSurface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn system() -> SimulationBuilder<WithSystem> {
        let mut particles = Particles::new();
        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let sphere = SphereSurface::new([0.0; 3], 5.0).unwrap();
        particles.add_random_particles(&sphere, 10, 1, 0.5, &mut rng);
        particles.push(Particle::new(1, [0.0, 0.0, 9.0], [1.0, 0.0, 0.0], 0.5));
        let container = Container::from_lengths(30.0, 30.0, 30.0, false).unwrap();
        SimulationBuilder::new().system(particles, container)
    }

    #[test]
    fn pair_potential_creates_default_neighbor_list() {
        let builder = system().pair_potential("soft", &Params::new()).unwrap();
        assert!(builder
            .config_record()
            .contains(&("neighbor_list.rcut".to_string(), "3".to_string())));
    }

    #[test]
    fn constraint_is_enforced_on_all_particles() {
        let builder = system()
            .constraint("sphere", &Params::new().with("r", 5.0))
            .unwrap();
        for pos in builder.particles().positions() {
            let r = crate::utils::norm(pos);
            assert!((r - 5.0).abs() < 1e-10);
        }
    }

    #[test]
    fn integrator_requires_potential() {
        let result = system()
            .constraint("sphere", &Params::new())
            .unwrap()
            .integrator("brownian_pos", &Params::new());
        assert!(matches!(
            result,
            Err(Error::MissingPrerequisite {
                what: "integrator",
                ..
            })
        ));
    }

    #[test]
    fn build_requires_integrator() {
        let result = system()
            .pair_potential("soft", &Params::new())
            .unwrap()
            .constraint("sphere", &Params::new())
            .unwrap()
            .build();
        assert!(matches!(
            result,
            Err(Error::MissingPrerequisite {
                missing: "an integrator",
                ..
            })
        ));
    }

    #[test]
    fn pair_range_beyond_neighbor_cutoff_is_rejected() {
        let result = system()
            .neighbor_list(1.0, 0.2)
            .unwrap()
            .pair_potential("soft", &Params::new().with("k", 10.0).with("a", 2.0))
            .unwrap()
            .constraint("sphere", &Params::new())
            .unwrap()
            .integrator("brownian_pos", &Params::new())
            .unwrap()
            .build();
        assert!(matches!(result, Err(Error::Config { .. })));

        let widened = system()
            .pair_potential("lj", &Params::new())
            .unwrap()
            .pair_parameters(
                "lj",
                &Params::new()
                    .with("type_1", 1)
                    .with("type_2", 2)
                    .with("rcut", 3.5),
            );
        assert!(matches!(widened, Err(Error::Config { .. })));
    }

    #[test]
    fn invalid_timestep_and_unknown_names() {
        assert!(SimulationBuilder::new().timestep(0.0).is_err());
        assert!(matches!(
            system().pair_potential("morse", &Params::new()),
            Err(Error::UnknownType { .. })
        ));
    }
}
