pub use super::builder::{Constrained, NoSystem, SimulationBuilder, WithSystem};
pub use super::constraint::ConstraintTrait;
pub use super::container::Container;
pub use super::error::Error;
pub use super::external::ExternalPotentialTrait;
pub use super::integrators::IntegratorTrait;
pub use super::pair::PairPotentialTrait;
pub use super::params::Params;
pub use super::particles::{Particle, Particles};
pub use super::population::PopulationTrait;
pub use super::region::{Rect, Region, SphereSurface};
pub use super::simulation::Simulation;
