pub mod coulomb;
pub mod ljcut;
pub mod polar_align;
pub mod soft;

pub use coulomb::Coulomb;
pub use ljcut::{LJCut, LJCutCoeff};
pub use polar_align::PolarAlign;
pub use soft::Soft;

use enum_dispatch::enum_dispatch;

use crate::{utils::Vec3, Error, Params};

#[enum_dispatch]
#[derive(Clone, Debug)]
pub enum PairPotential {
    Soft,
    LJCut,
    Coulomb,
    PolarAlign,
}
#[enum_dispatch(PairPotential)]
/// Trait for pairwise potentials
pub trait PairPotentialTrait {
    /// Whether the potential only acts within a finite range and can use the
    /// neighbor list. Long range potentials visit every pair.
    fn needs_neighbor_list(&self) -> bool {
        true
    }

    /// Replace the global parameters, or those of one pair of types when
    /// `type_1` and `type_2` are given
    fn set_parameters(&mut self, params: &Params) -> Result<(), Error>;

    /// Largest distance at which any pair of types interacts, given the
    /// largest particle radius in the system
    fn cutoff_distance(&self, largest_radius: f64) -> f64;

    /// Force, torques and energy of one pair, or `None` outside the
    /// interaction range
    fn interact(&self, pair: &PairContext) -> Option<PairTerm>;
}

/// Everything a pair potential may look at for one unordered pair `(i, j)`
#[derive(Clone, Copy, Debug)]
pub struct PairContext {
    pub type_i: usize,
    pub type_j: usize,
    pub radius_i: f64,
    pub radius_j: f64,
    pub director_i: Vec3,
    pub director_j: Vec3,
    /// `x_i - x_j` under the minimum image convention
    pub dr: Vec3,
    pub r2: f64,
}

/// Contribution of one pair. The force acts on `i`; `j` receives the opposite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PairTerm {
    pub force: Vec3,
    pub torque_i: Vec3,
    pub torque_j: Vec3,
    pub energy: f64,
}

/// Read the `type_1`/`type_2` keys addressing one pair of types
pub(crate) fn type_pair(params: &Params, context: &str) -> Result<Option<(usize, usize)>, Error> {
    let type_1 = params.usize_opt("type_1", context)?;
    let type_2 = params.usize_opt("type_2", context)?;
    match (type_1, type_2) {
        (Some(i), Some(j)) => Ok(Some((i, j))),
        (None, None) => Ok(None),
        _ => Err(Error::config(
            context,
            "type_1 and type_2 have to be given together",
        )),
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;

    pub fn context(dr: Vec3) -> PairContext {
        PairContext {
            type_i: 1,
            type_j: 1,
            radius_i: 0.5,
            radius_j: 0.5,
            director_i: [1.0, 0.0, 0.0],
            director_j: [0.0, 1.0, 0.0],
            dr,
            r2: dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2],
        }
    }
}
