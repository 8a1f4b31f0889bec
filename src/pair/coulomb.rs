use super::{type_pair, PairContext, PairPotentialTrait, PairTerm};
use crate::{utils::PairTable, Error, Params};

const CONTEXT: &str = "pair potential coulomb";

/// Unscreened Coulomb interaction, `U(r) = alpha / r`, over every pair
#[derive(Clone, Debug)]
pub struct Coulomb {
    alphas: PairTable<f64>,
}
impl Coulomb {
    pub fn new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            alphas: PairTable::new(params.f64_or("alpha", 1.0, CONTEXT)?),
        })
    }
}
impl PairPotentialTrait for Coulomb {
    fn needs_neighbor_list(&self) -> bool {
        false
    }
    fn set_parameters(&mut self, params: &Params) -> Result<(), Error> {
        let alpha = params.f64_or("alpha", 1.0, CONTEXT)?;
        match type_pair(params, CONTEXT)? {
            Some((i, j)) => self.alphas.set(i, j, alpha),
            None => self.alphas.set_global(alpha),
        }
        Ok(())
    }
    fn cutoff_distance(&self, _largest_radius: f64) -> f64 {
        f64::INFINITY
    }
    fn interact(&self, pair: &PairContext) -> Option<PairTerm> {
        let alpha = self.alphas.get(pair.type_i, pair.type_j);
        let r = pair.r2.sqrt();
        let f_over_r = alpha / (pair.r2 * r);
        Some(PairTerm {
            force: [f_over_r * pair.dr[0], f_over_r * pair.dr[1], f_over_r * pair.dr[2]],
            energy: alpha / r,
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
    fn acts_at_any_distance() {
        let coulomb = Coulomb::new(&Params::new().with("alpha", 2.0)).unwrap();
        assert!(!coulomb.needs_neighbor_list());
        let term = coulomb.interact(&context([0.0, 0.0, 4.0])).unwrap();
        assert_relative_eq!(term.energy, 0.5);
        assert_relative_eq!(term.force[2], 0.125);
    }
}
