use super::{type_pair, PairContext, PairPotentialTrait, PairTerm};
use crate::{utils::PairTable, Error, Params};

const CONTEXT: &str = "pair potential soft";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoftCoeff {
    pub k: f64,
    /// Interaction range, ignored when particle radii are used
    pub a: f64,
}

/// Soft harmonic repulsion, `U(r) = k/2 (a - r)^2` for `r < a`
#[derive(Clone, Debug)]
pub struct Soft {
    coeffs: PairTable<SoftCoeff>,
    use_particle_radii: bool,
}
impl Soft {
    pub fn new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            coeffs: PairTable::new(Self::read_coeff(params)?),
            use_particle_radii: params.bool_or("use_particle_radii", false, CONTEXT)?,
        })
    }
    pub fn coeff(&self, type_i: usize, type_j: usize) -> SoftCoeff {
        self.coeffs.get(type_i, type_j)
    }
    fn read_coeff(params: &Params) -> Result<SoftCoeff, Error> {
        Ok(SoftCoeff {
            k: params.f64_or("k", 1.0, CONTEXT)?,
            a: params.positive_or("a", 2.0, CONTEXT)?,
        })
    }
}
impl PairPotentialTrait for Soft {
    fn set_parameters(&mut self, params: &Params) -> Result<(), Error> {
        let coeff = Self::read_coeff(params)?;
        match type_pair(params, CONTEXT)? {
            Some((i, j)) => self.coeffs.set(i, j, coeff),
            None => {
                self.coeffs.set_global(coeff);
                self.use_particle_radii = params.bool_or("use_particle_radii", false, CONTEXT)?;
            }
        }
        Ok(())
    }
    fn cutoff_distance(&self, largest_radius: f64) -> f64 {
        if self.use_particle_radii {
            2.0 * largest_radius
        } else {
            self.coeffs.all().map(|c| c.a).fold(0.0, f64::max)
        }
    }
    fn interact(&self, pair: &PairContext) -> Option<PairTerm> {
        let coeff = self.coeffs.get(pair.type_i, pair.type_j);
        let a = if self.use_particle_radii {
            pair.radius_i + pair.radius_j
        } else {
            coeff.a
        };
        if pair.r2 >= a * a {
            return None;
        }
        let r = pair.r2.sqrt();
        let overlap = a - r;
        let f_over_r = coeff.k * overlap / r;
        Some(PairTerm {
            force: [f_over_r * pair.dr[0], f_over_r * pair.dr[1], f_over_r * pair.dr[2]],
            energy: 0.5 * coeff.k * overlap * overlap,
            ..Default::default()
        })
    }
}
