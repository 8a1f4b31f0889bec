//! Overdamped dynamics of active particles confined to analytic manifolds.
//!
//! Particles interact through pair and external potentials, move under
//! stochastic Brownian integrators while a constraint keeps them on a sphere
//! or a plane, and may divide or die through a population controller.
//! [`SimulationBuilder`] assembles a [`Simulation`] from registry names and
//! [`Params`] maps.

pub mod builder;
pub mod constraint;
pub mod container;
pub mod error;
pub mod external;
pub mod integrators;
pub mod neighbor;
pub mod pair;
pub mod params;
pub mod particles;
pub mod population;
pub mod potential;
pub mod prelude;
pub mod region;
pub mod registry;
pub mod simulation;
pub mod utils;
pub mod value;

pub use builder::SimulationBuilder;
pub use constraint::{Constraint, ConstraintTrait};
pub use container::Container;
pub use error::Error;
pub use external::{ExternalPotential, ExternalPotentialTrait};
pub use integrators::{Integrator, IntegratorState, IntegratorTrait};
pub use neighbor::NeighborList;
pub use pair::{PairPotential, PairPotentialTrait};
pub use params::Params;
pub use particles::{Particle, Particles};
pub use population::{Population, PopulationTrait};
pub use potential::Potential;
pub use region::{Rect, Region, SphereSurface};
pub use registry::Registry;
pub use simulation::Simulation;
pub use value::Value;
