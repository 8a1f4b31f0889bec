use super::{type_pair, PairContext, PairPotentialTrait, PairTerm};
use crate::{utils::PairTable, Error, Params};

const CONTEXT: &str = "pair potential lj";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LJCutCoeff {
    sigma: f64,
    epsilon: f64,
    rcut: f64,
    sigma6: f64,
    rcut2: f64,
    prefactor: f64, // = 24 epsilon * sigma^6
    shift: f64,     // energy at the cutoff
}
impl LJCutCoeff {
    pub fn new(sigma: f64, epsilon: f64, rcut: f64) -> Self {
        let sigma6 = sigma.powi(6);
        let rcut2 = rcut * rcut;
        let rcut6 = rcut2 * rcut2 * rcut2;
        Self {
            sigma,
            epsilon,
            rcut,
            sigma6,
            rcut2,
            prefactor: 24.0 * epsilon * sigma6,
            shift: 4.0 * epsilon * sigma6 / rcut6 * (sigma6 / rcut6 - 1.0),
        }
    }
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
    pub fn rcut(&self) -> f64 {
        self.rcut
    }
}

/// Lennard-Jones 12-6 potential, cut and shifted to zero at `rcut`
#[derive(Clone, Debug)]
pub struct LJCut {
    coeffs: PairTable<LJCutCoeff>,
}
impl LJCut {
    pub fn new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            coeffs: PairTable::new(Self::read_coeff(params)?),
        })
    }
    pub fn coeff(&self, type_i: usize, type_j: usize) -> LJCutCoeff {
        self.coeffs.get(type_i, type_j)
    }
    fn read_coeff(params: &Params) -> Result<LJCutCoeff, Error> {
        let epsilon = params.f64_or("eps", 1.0, CONTEXT)?;
        let sigma = params.positive_or("sigma", 1.0, CONTEXT)?;
        let rcut = params.positive_or("rcut", 2.5 * sigma, CONTEXT)?;
        Ok(LJCutCoeff::new(sigma, epsilon, rcut))
    }
}

impl PairPotentialTrait for LJCut {
    fn set_parameters(&mut self, params: &Params) -> Result<(), Error> {
        let coeff = Self::read_coeff(params)?;
        match type_pair(params, CONTEXT)? {
            Some((i, j)) => self.coeffs.set(i, j, coeff),
            None => self.coeffs.set_global(coeff),
        }
        Ok(())
    }
    fn cutoff_distance(&self, _largest_radius: f64) -> f64 {
        self.coeffs.all().map(|c| c.rcut).fold(0.0, f64::max)
    }
    fn interact(&self, pair: &PairContext) -> Option<PairTerm> {
        // U(r) = 4 eps ((sig/r)^12 - (sig/r)^6) - U(rcut)
        // F_i = -dU/dr dr_ij/r = 24 eps sig^6 / r^8 (2 sig^6/r^6 - 1) dr_ij
        // with dr_ij = x_i - x_j, so a short pair pushes i away from j.
        let coeff = self.coeffs.get(pair.type_i, pair.type_j);
        if pair.r2 > coeff.rcut2 {
            return None;
        }
        let r6 = pair.r2 * pair.r2 * pair.r2;
        let f_mag = coeff.prefactor / r6 / pair.r2 * (2.0 * coeff.sigma6 / r6 - 1.0);
        Some(PairTerm {
            force: [pair.dr[0] * f_mag, pair.dr[1] * f_mag, pair.dr[2] * f_mag],
            energy: 4.0 * coeff.epsilon * coeff.sigma6 / r6 * (coeff.sigma6 / r6 - 1.0)
                - coeff.shift,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::test_utils::context;
    use approx::assert_relative_eq;

    #[test]
    fn force_vanishes_at_minimum() {
        let lj = LJCut::new(&Params::new()).unwrap();
        let rmin = 2.0_f64.powf(1.0 / 6.0);
        let term = lj.interact(&context([rmin, 0.0, 0.0])).unwrap();
        assert_relative_eq!(term.force[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn short_pairs_repel_and_energy_is_shifted() {
        let lj = LJCut::new(&Params::new().with("rcut", 3.0)).unwrap();
        let term = lj.interact(&context([0.9, 0.0, 0.0])).unwrap();
        assert!(term.force[0] > 0.0);
        let at_cut = lj.interact(&context([3.0, 0.0, 0.0])).unwrap();
        assert_relative_eq!(at_cut.energy, 0.0, epsilon = 1e-14);
        assert!(lj.interact(&context([3.1, 0.0, 0.0])).is_none());
    }

    #[test]
    fn force_is_minus_energy_gradient() {
        let lj = LJCut::new(&Params::new()).unwrap();
        let (r, h) = (1.3, 1e-6);
        let e = |x: f64| lj.interact(&context([x, 0.0, 0.0])).unwrap().energy;
        let numeric = -(e(r + h) - e(r - h)) / (2.0 * h);
        let term = lj.interact(&context([r, 0.0, 0.0])).unwrap();
        assert_relative_eq!(term.force[0], numeric, max_relative = 1e-6);
    }

    #[test]
    fn cutoff_covers_all_pairs() {
        let mut lj = LJCut::new(&Params::new()).unwrap();
        lj.set_parameters(&Params::new().with("type_1", 1).with("type_2", 2).with("rcut", 4.0))
            .unwrap();
        assert_relative_eq!(lj.cutoff_distance(0.5), 4.0);
        assert_relative_eq!(lj.coeff(1, 1).rcut(), 2.5);
    }
}
