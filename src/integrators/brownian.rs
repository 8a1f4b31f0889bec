use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use super::{
    flip_probability, nematic_flip, orientation_step, position_step, read_group, IntegratorTrait,
    StepContext,
};
use crate::{Error, Params};

const CONTEXT: &str = "integrator brownian";

/// Legacy integrator moving positions and directors with a single random
/// stream. Positions carry no translational noise.
#[derive(Clone, Debug)]
pub struct Brownian {
    group: String,
    v0: f64,
    nu: f64,
    mu: f64,
    mur: f64,
    flip_probability: Option<f64>,
    rng: ChaCha12Rng,
}
impl Brownian {
    pub fn new(params: &Params, dt: f64) -> Result<Self, Error> {
        log::warn!(
            "Brownian dynamics is a legacy integrator kept for backwards compatibility. \
             Please consider using brownian_pos and brownian_align instead."
        );
        let flip_probability = if params.bool_or("nematic", false, CONTEXT)? {
            Some(flip_probability(params, dt, CONTEXT)?)
        } else {
            None
        };
        Ok(Self {
            group: read_group(params, CONTEXT),
            v0: params.f64_or("v0", 1.0, CONTEXT)?,
            nu: params.f64_or("nu", 1.0, CONTEXT)?,
            mu: params.f64_or("mu", 1.0, CONTEXT)?,
            mur: params.f64_or("mur", 1.0, CONTEXT)?,
            flip_probability,
            rng: ChaCha12Rng::seed_from_u64(params.u64_or("seed", 0, CONTEXT)?),
        })
    }
}
impl IntegratorTrait for Brownian {
    fn name(&self) -> &'static str {
        "brownian"
    }
    fn group(&self) -> &str {
        &self.group
    }
    fn pre_force(&mut self, ctx: &mut StepContext) -> Result<(), Error> {
        if let Some(probability) = self.flip_probability {
            let idxs = ctx.particles.group_indices(&self.group);
            nematic_flip(ctx.particles, &idxs, probability, &mut self.rng);
        }
        Ok(())
    }
    fn integrate(&mut self, ctx: &mut StepContext) -> Result<(), Error> {
        for i in ctx.particles.group_indices(&self.group) {
            position_step(ctx, i, self.mu, self.v0, 0.0, &mut self.rng)?;
            orientation_step(ctx, i, self.mur, self.nu, &mut self.rng)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrators::test_utils::Fixture;
    use approx::assert_relative_eq;

    #[test]
    fn moves_and_turns() {
        let mut fixture = Fixture::plane(1);
        let mut integrator = Brownian::new(&Params::new().with("seed", 3), 0.01).unwrap();
        integrator.integrate(&mut fixture.ctx(0)).unwrap();
        assert_relative_eq!(fixture.particles.positions[0][0], -5.0 + 0.01);
        assert_ne!(fixture.particles.directors[0], [1.0, 0.0, 0.0]);
        assert_relative_eq!(fixture.particles.directors[0][2], 0.0);
    }
}
