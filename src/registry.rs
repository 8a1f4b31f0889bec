//! Name to constructor tables for every pluggable component.
//!
//! The default registry knows all built-in components. Further names can be
//! registered, e.g. to provide a potential with preset parameters under a new
//! name.

use crate::{
    constraint::{Constraint, Plane, Sphere},
    external::{ExternalPotential, Gravity, Harmonic, SelfPropulsion},
    integrators::{Brownian, BrownianAlign, BrownianPos, Integrator},
    pair::{Coulomb, LJCut, PairPotential, PolarAlign, Soft},
    population::{Population, PopulationRandom},
    utils::KeyedVec,
    Error, Params,
};

pub type PairConstructor = Box<dyn Fn(&Params) -> Result<PairPotential, Error>>;
pub type ExternalConstructor = Box<dyn Fn(&Params) -> Result<ExternalPotential, Error>>;
pub type ConstraintConstructor = Box<dyn Fn(&Params) -> Result<Constraint, Error>>;
/// Constructors that depend on the time step
pub type IntegratorConstructor = Box<dyn Fn(&Params, f64) -> Result<Integrator, Error>>;
pub type PopulationConstructor = Box<dyn Fn(&Params, f64) -> Result<Population, Error>>;

pub struct Registry {
    pair_potentials: KeyedVec<String, PairConstructor>,
    external_potentials: KeyedVec<String, ExternalConstructor>,
    constraints: KeyedVec<String, ConstraintConstructor>,
    integrators: KeyedVec<String, IntegratorConstructor>,
    populations: KeyedVec<String, PopulationConstructor>,
}
impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_pair_potential("soft", |p| Ok(Soft::new(p)?.into()));
        registry.register_pair_potential("lj", |p| Ok(LJCut::new(p)?.into()));
        registry.register_pair_potential("coulomb", |p| Ok(Coulomb::new(p)?.into()));
        registry.register_pair_potential("polar_align", |p| Ok(PolarAlign::new(p)?.into()));

        registry.register_external_potential("gravity", |p| Ok(Gravity::new(p)?.into()));
        registry.register_external_potential("harmonic", |p| Ok(Harmonic::new(p)?.into()));
        registry.register_external_potential("self_propulsion", |p| {
            Ok(SelfPropulsion::new(p)?.into())
        });

        registry.register_constraint("sphere", |p| Ok(Sphere::new(p)?.into()));
        registry.register_constraint("plane", |p| Ok(Plane::new(p)?.into()));

        registry.register_integrator("brownian_pos", |p, _| Ok(BrownianPos::new(p)?.into()));
        registry.register_integrator("brownian_align", |p, dt| {
            Ok(BrownianAlign::new(p, dt)?.into())
        });
        registry.register_integrator("brownian", |p, dt| Ok(Brownian::new(p, dt)?.into()));

        registry.register_population("random", |p, dt| Ok(PopulationRandom::new(p, dt)?.into()));
        registry
    }
}
impl Registry {
    /// Registry without any entries
    pub fn empty() -> Self {
        Self {
            pair_potentials: KeyedVec::new(),
            external_potentials: KeyedVec::new(),
            constraints: KeyedVec::new(),
            integrators: KeyedVec::new(),
            populations: KeyedVec::new(),
        }
    }

    // Registration, replacing any previous entry of the same name

    pub fn register_pair_potential<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&Params) -> Result<PairPotential, Error> + 'static,
    {
        self.pair_potentials
            .insert(name.to_string(), Box::new(constructor));
    }
    pub fn register_external_potential<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&Params) -> Result<ExternalPotential, Error> + 'static,
    {
        self.external_potentials
            .insert(name.to_string(), Box::new(constructor));
    }
    pub fn register_constraint<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&Params) -> Result<Constraint, Error> + 'static,
    {
        self.constraints.insert(name.to_string(), Box::new(constructor));
    }
    pub fn register_integrator<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&Params, f64) -> Result<Integrator, Error> + 'static,
    {
        self.integrators.insert(name.to_string(), Box::new(constructor));
    }
    pub fn register_population<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&Params, f64) -> Result<Population, Error> + 'static,
    {
        self.populations.insert(name.to_string(), Box::new(constructor));
    }

    // Construction

    pub fn pair_potential(&self, name: &str, params: &Params) -> Result<PairPotential, Error> {
        let constructor = self
            .pair_potentials
            .get(name)
            .ok_or_else(|| unknown("pair potential", name))?;
        constructor(params)
    }
    pub fn external_potential(
        &self,
        name: &str,
        params: &Params,
    ) -> Result<ExternalPotential, Error> {
        let constructor = self
            .external_potentials
            .get(name)
            .ok_or_else(|| unknown("external potential", name))?;
        constructor(params)
    }
    pub fn constraint(&self, name: &str, params: &Params) -> Result<Constraint, Error> {
        let constructor = self
            .constraints
            .get(name)
            .ok_or_else(|| unknown("constraint", name))?;
        constructor(params)
    }
    pub fn integrator(&self, name: &str, params: &Params, dt: f64) -> Result<Integrator, Error> {
        let constructor = self
            .integrators
            .get(name)
            .ok_or_else(|| unknown("integrator", name))?;
        constructor(params, dt)
    }
    pub fn population(&self, name: &str, params: &Params, dt: f64) -> Result<Population, Error> {
        let constructor = self
            .populations
            .get(name)
            .ok_or_else(|| unknown("population", name))?;
        constructor(params, dt)
    }

    pub fn pair_potential_names(&self) -> impl Iterator<Item = &str> {
        self.pair_potentials.keys().map(String::as_str)
    }
    pub fn external_potential_names(&self) -> impl Iterator<Item = &str> {
        self.external_potentials.keys().map(String::as_str)
    }
    pub fn constraint_names(&self) -> impl Iterator<Item = &str> {
        self.constraints.keys().map(String::as_str)
    }
    pub fn integrator_names(&self) -> impl Iterator<Item = &str> {
        self.integrators.keys().map(String::as_str)
    }
    pub fn population_names(&self) -> impl Iterator<Item = &str> {
        self.populations.keys().map(String::as_str)
    }
}

fn unknown(kind: &'static str, name: &str) -> Error {
    log::error!("Unknown {} type {}.", kind, name);
    Error::UnknownType {
        kind,
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::PairPotentialTrait;

    #[test]
    fn builtins_are_registered() {
        let registry = Registry::default();
        assert_eq!(
            registry.pair_potential_names().collect::<Vec<_>>(),
            vec!["soft", "lj", "coulomb", "polar_align"]
        );
        assert_eq!(registry.constraint_names().count(), 2);
        assert_eq!(registry.integrator_names().count(), 3);
        assert!(registry.population("random", &Params::new(), 0.01).is_ok());
    }

    #[test]
    fn unknown_names_are_configuration_errors() {
        let registry = Registry::default();
        assert_eq!(
            registry.constraint("torus", &Params::new()).unwrap_err(),
            Error::UnknownType {
                kind: "constraint",
                name: "torus".into()
            }
        );
    }

    #[test]
    fn custom_entries_can_be_added() {
        let mut registry = Registry::empty();
        registry.register_pair_potential("charges", |p| {
            Ok(Coulomb::new(&p.clone().with("alpha", -1.0))?.into())
        });
        let potential = registry.pair_potential("charges", &Params::new()).unwrap();
        assert!(!potential.needs_neighbor_list());
        assert!(registry.pair_potential("soft", &Params::new()).is_err());
    }
}
