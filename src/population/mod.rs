//! Stochastic birth and death of particles.

mod random;

pub use random::PopulationRandom;

use enum_dispatch::enum_dispatch;

use crate::{integrators::StepContext, Error};

#[enum_dispatch]
#[derive(Clone, Debug)]
pub enum Population {
    PopulationRandom,
}
#[enum_dispatch(Population)]
/// Population controller
///
/// Both operations only act on attempt steps. Any attempt may change the
/// store, so callers force a neighbor list rebuild whenever
/// [`PopulationTrait::attempts_at`] is true.
pub trait PopulationTrait {
    fn name(&self) -> &'static str;

    fn attempts_at(&self, step: usize) -> bool;

    /// Split particles of the group. Returns the number of divisions.
    fn divide(&mut self, ctx: &mut StepContext) -> Result<usize, Error>;

    /// Remove particles of the group. Returns the number of removals.
    fn remove(&mut self, ctx: &mut StepContext) -> Result<usize, Error>;
}
