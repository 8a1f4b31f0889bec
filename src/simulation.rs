use crate::{
    constraint::Constraint,
    integrators::{Integrator, IntegratorState, IntegratorTrait, StepContext},
    population::{Population, PopulationTrait},
    utils::KeyedVec,
    Container, Error, NeighborList, Particles, Potential,
};

/// An integrator together with its lifecycle state
#[derive(Clone, Debug)]
pub struct IntegratorSlot {
    pub integrator: Integrator,
    pub state: IntegratorState,
}

/// The main simulation class, exclusive owner of the particles and of every
/// component acting on them.
///
/// Built with [`crate::SimulationBuilder`], which guarantees that a constraint,
/// at least one potential and at least one integrator are present.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub particles: Particles,
    container: Container,
    constraint: Constraint,
    potential: Potential,
    neighbor_list: NeighborList,
    integrators: KeyedVec<String, IntegratorSlot>,
    populations: KeyedVec<String, Population>,
    timestep: f64,
    step: usize,
    potential_energy: f64,
    config_record: Vec<(String, String)>,
}
impl Simulation {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        particles: Particles,
        container: Container,
        constraint: Constraint,
        potential: Potential,
        neighbor_list: NeighborList,
        integrators: KeyedVec<String, Integrator>,
        populations: KeyedVec<String, Population>,
        timestep: f64,
        config_record: Vec<(String, String)>,
    ) -> Self {
        let mut slots = KeyedVec::new();
        for (name, integrator) in integrators {
            slots.insert(
                name,
                IntegratorSlot {
                    integrator,
                    state: IntegratorState::Ready,
                },
            );
        }
        Self {
            particles,
            container,
            constraint,
            potential,
            neighbor_list,
            integrators: slots,
            populations,
            timestep,
            step: 0,
            potential_energy: 0.0,
            config_record,
        }
    }

    // Getters

    pub fn container(&self) -> &Container {
        &self.container
    }
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }
    pub fn potential(&self) -> &Potential {
        &self.potential
    }
    pub fn neighbor_list(&self) -> &NeighborList {
        &self.neighbor_list
    }
    pub fn neighbor_list_mut(&mut self) -> &mut NeighborList {
        &mut self.neighbor_list
    }
    pub fn timestep(&self) -> f64 {
        self.timestep
    }
    /// Number of completed steps
    pub fn current_step(&self) -> usize {
        self.step
    }
    /// Total potential energy of the last force computation
    pub fn potential_energy(&self) -> f64 {
        self.potential_energy
    }
    /// Energy of every potential from the last force computation
    pub fn energies(&self) -> Vec<(String, f64)> {
        self.potential.energies()
    }
    /// Every configured parameter, as `<kind>.<name>.<key>` and value
    pub fn config_record(&self) -> &[(String, String)] {
        &self.config_record
    }
    pub fn integrator_state(&self, name: &str) -> Option<IntegratorState> {
        self.integrators.get(name).map(|slot| slot.state)
    }

    // Integrator lifecycle

    pub fn disable_integrator(&mut self, name: &str) -> Result<(), Error> {
        self.integrator_slot(name)?.state = IntegratorState::Disabled;
        log::info!("Disabled integrator {}.", name);
        Ok(())
    }
    pub fn enable_integrator(&mut self, name: &str) -> Result<(), Error> {
        self.integrator_slot(name)?.state = IntegratorState::Ready;
        log::info!("Enabled integrator {}.", name);
        Ok(())
    }
    fn integrator_slot(&mut self, name: &str) -> Result<&mut IntegratorSlot, Error> {
        self.integrators
            .get_mut(name)
            .ok_or_else(|| Error::UnknownType {
                kind: "integrator",
                name: name.to_string(),
            })
    }

    // Neighbor list hooks

    /// Whether any potential uses the neighbor list
    pub fn need_nlist(&self) -> bool {
        self.potential.need_neighbor_list()
    }
    /// Whether the particle at `idx` moved too far since the last build
    pub fn need_update(&self, idx: usize) -> bool {
        self.neighbor_list
            .need_update(idx, &self.particles, &self.container)
    }
    /// Rebuild the neighbor list unconditionally
    pub fn build(&mut self) {
        self.neighbor_list.build(&self.particles, &self.container);
        self.neighbor_list.update_settings.record_update(self.step);
    }
    /// Rebuild the neighbor list if it is missing, invalidated, or some
    /// particle exceeded its displacement budget. Returns whether it rebuilt.
    pub fn check_build_neighbor_list(&mut self) -> bool {
        if !self.need_nlist() {
            return false;
        }
        let nlist = &self.neighbor_list;
        let rebuild = !nlist.is_built()
            || nlist.is_forced()
            || (nlist.update_settings.should_update_neighbors(self.step)
                && (!nlist.update_settings.check
                    || nlist.any_need_update(&self.particles, &self.container)));
        if rebuild {
            self.build();
        }
        rebuild
    }

    // Energies

    pub fn compute_pair_potential_energy_of_type(&mut self, name: &str) -> Result<f64, Error> {
        self.check_build_neighbor_list();
        self.potential.compute_pair_potential_energy_of_type(
            name,
            &self.particles,
            &self.neighbor_list,
            &self.container,
        )
    }
    pub fn compute_external_potential_energy_of_type(&self, name: &str) -> Result<f64, Error> {
        self.potential
            .compute_external_potential_energy_of_type(name, &self.particles)
    }

    // Stepping

    /// One integration step: pre-force hooks, force computation and every
    /// enabled integrator. Ages advance by one time step.
    pub fn integrate(&mut self) -> Result<(), Error> {
        let mut ctx = StepContext {
            particles: &mut self.particles,
            container: &self.container,
            constraint: &self.constraint,
            dt: self.timestep,
            step: self.step,
        };
        for (_, slot) in self.integrators.iter_mut() {
            if slot.state == IntegratorState::Ready {
                slot.integrator.pre_force(&mut ctx)?;
            }
        }

        self.check_build_neighbor_list();
        self.potential_energy =
            self.potential
                .compute(&mut self.particles, &self.neighbor_list, &self.container)?;

        let mut ctx = StepContext {
            particles: &mut self.particles,
            container: &self.container,
            constraint: &self.constraint,
            dt: self.timestep,
            step: self.step,
        };
        for (_, slot) in self.integrators.iter_mut() {
            if slot.state != IntegratorState::Ready {
                continue;
            }
            slot.state = IntegratorState::Stepping;
            slot.integrator.integrate(&mut ctx)?;
            slot.state = IntegratorState::Ready;
        }

        let dt = self.timestep;
        self.particles.ages.iter_mut().for_each(|age| *age += dt);
        Ok(())
    }

    /// Attempt divisions for every population controller. Returns the number
    /// of divisions.
    pub fn divide(&mut self, step: usize) -> Result<usize, Error> {
        self.populate(step, PopulationTrait::divide)
    }
    /// Attempt removals for every population controller. Returns the number
    /// of removed particles.
    pub fn remove(&mut self, step: usize) -> Result<usize, Error> {
        self.populate(step, PopulationTrait::remove)
    }
    fn populate<F>(&mut self, step: usize, mut op: F) -> Result<usize, Error>
    where
        F: FnMut(&mut Population, &mut StepContext) -> Result<usize, Error>,
    {
        let mut ctx = StepContext {
            particles: &mut self.particles,
            container: &self.container,
            constraint: &self.constraint,
            dt: self.timestep,
            step,
        };
        let mut count = 0;
        let mut attempted = false;
        for (_, population) in self.populations.iter_mut() {
            if population.attempts_at(step) {
                attempted = true;
                count += op(population, &mut ctx)?;
            }
        }
        if attempted {
            self.neighbor_list.force_rebuild();
            // children may have grown beyond the list cutoff
            self.potential
                .check_ranges(self.neighbor_list.cutoff(), self.particles.max_radius())?;
        }
        Ok(count)
    }

    /// Advance the simulation by one full step
    pub fn step(&mut self) -> Result<(), Error> {
        self.integrate()?;
        self.divide(self.step)?;
        self.remove(self.step)?;
        self.check_build_neighbor_list();
        self.step += 1;
        Ok(())
    }

    pub fn run(&mut self, num_steps: usize) -> Result<(), Error> {
        let builds_before = self.neighbor_list.build_count();
        log::info!(
            "Running {} steps with {} particles.",
            num_steps,
            self.particles.len()
        );
        for _ in 0..num_steps {
            self.step()?;
        }
        log::info!(
            "Neighbor list was rebuilt {} times during the run.",
            self.neighbor_list.build_count() - builds_before
        );
        Ok(())
    }
}
