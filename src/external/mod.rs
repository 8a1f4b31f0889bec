pub mod gravity;
pub mod harmonic;
pub mod self_propulsion;

pub use gravity::Gravity;
pub use harmonic::Harmonic;
pub use self_propulsion::SelfPropulsion;

use enum_dispatch::enum_dispatch;

use crate::{utils::Vec3, Error, Params};

#[enum_dispatch]
#[derive(Clone, Debug)]
pub enum ExternalPotential {
    Gravity,
    Harmonic,
    SelfPropulsion,
}
#[enum_dispatch(ExternalPotential)]
/// Trait for single-particle potentials
pub trait ExternalPotentialTrait {
    /// Replace the global parameters, or those of one particle type when
    /// `type` is given
    fn set_parameters(&mut self, params: &Params) -> Result<(), Error>;

    fn act(&self, particle: &ExternalContext) -> ExternalTerm;
}

#[derive(Clone, Copy, Debug)]
pub struct ExternalContext {
    pub type_: usize,
    pub position: Vec3,
    pub director: Vec3,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExternalTerm {
    pub force: Vec3,
    pub torque: Vec3,
    pub energy: f64,
}

pub(crate) fn particle_type(params: &Params, context: &str) -> Result<Option<usize>, Error> {
    params.usize_opt("type", context)
}
