use super::{type_pair, PairContext, PairPotentialTrait, PairTerm};
use crate::{
    utils::{cross, dot, scale, PairTable},
    Error, Params,
};

const CONTEXT: &str = "pair potential polar_align";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarAlignCoeff {
    pub j: f64,
    pub a: f64,
}

/// Ferromagnetic alignment of directors within range `a`,
/// `U = -J n_i . n_j`. Produces torques only.
#[derive(Clone, Debug)]
pub struct PolarAlign {
    coeffs: PairTable<PolarAlignCoeff>,
}
impl PolarAlign {
    pub fn new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            coeffs: PairTable::new(Self::read_coeff(params)?),
        })
    }
    fn read_coeff(params: &Params) -> Result<PolarAlignCoeff, Error> {
        Ok(PolarAlignCoeff {
            j: params.f64_or("J", 1.0, CONTEXT)?,
            a: params.positive_or("a", 2.0, CONTEXT)?,
        })
    }
}
impl PairPotentialTrait for PolarAlign {
    fn set_parameters(&mut self, params: &Params) -> Result<(), Error> {
        let coeff = Self::read_coeff(params)?;
        match type_pair(params, CONTEXT)? {
            Some((i, j)) => self.coeffs.set(i, j, coeff),
            None => self.coeffs.set_global(coeff),
        }
        Ok(())
    }
    fn cutoff_distance(&self, _largest_radius: f64) -> f64 {
        self.coeffs.all().map(|c| c.a).fold(0.0, f64::max)
    }
    fn interact(&self, pair: &PairContext) -> Option<PairTerm> {
        let coeff = self.coeffs.get(pair.type_i, pair.type_j);
        if pair.r2 >= coeff.a * coeff.a {
            return None;
        }
        let torque = scale(&cross(&pair.director_i, &pair.director_j), coeff.j);
        Some(PairTerm {
            force: [0.0; 3],
            torque_i: torque,
            torque_j: scale(&torque, -1.0),
            energy: -coeff.j * dot(&pair.director_i, &pair.director_j),
        })
    }
}
