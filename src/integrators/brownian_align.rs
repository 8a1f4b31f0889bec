use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use super::{flip_probability, nematic_flip, orientation_step, read_group, IntegratorTrait, StepContext};
use crate::{Error, Params, Value};

const CONTEXT: &str = "integrator brownian_align";

/// Rotational Brownian dynamics of directors in the tangent plane
#[derive(Clone, Debug)]
pub struct BrownianAlign {
    group: String,
    mur: f64,
    nu: Value,
    /// Flip probability per step, present for nematic systems
    flip_probability: Option<f64>,
    rng: ChaCha12Rng,
}
impl BrownianAlign {
    pub fn new(params: &Params, dt: f64) -> Result<Self, Error> {
        let nematic = params.bool_or("nematic", false, CONTEXT)?;
        let flip_probability = if nematic {
            log::info!("{}: assuming nematic order parameter.", CONTEXT);
            Some(flip_probability(params, dt, CONTEXT)?)
        } else {
            log::info!("{}: assuming polar order parameter.", CONTEXT);
            None
        };
        Ok(Self {
            group: read_group(params, CONTEXT),
            mur: params.f64_or("mur", 1.0, CONTEXT)?,
            nu: Value::from_params(params, "nu", 1.0, CONTEXT)?,
            flip_probability,
            rng: ChaCha12Rng::seed_from_u64(params.u64_or("seed", 0, CONTEXT)?),
        })
    }
    pub fn is_nematic(&self) -> bool {
        self.flip_probability.is_some()
    }
}
impl IntegratorTrait for BrownianAlign {
    fn name(&self) -> &'static str {
        "brownian_align"
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
        let nu = self.nu.at(ctx.step);
        for i in ctx.particles.group_indices(&self.group) {
            orientation_step(ctx, i, self.mur, nu, &mut self.rng)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{integrators::test_utils::Fixture, utils::norm};
    use approx::assert_relative_eq;

    #[test]
    fn torque_turns_director_deterministically_without_noise() {
        let mut fixture = Fixture::plane(1);
        fixture.particles.torques[0] = [0.0, 0.0, 50.0];
        let params = Params::new().with("nu", 0.0).with("mur", 2.0);
        let mut integrator = BrownianAlign::new(&params, 0.01).unwrap();
        integrator.integrate(&mut fixture.ctx(0)).unwrap();
        let n = fixture.particles.directors[0];
        assert_relative_eq!(fixture.particles.omegas[0], 100.0);
        assert_relative_eq!(n[0], 1.0_f64.cos(), epsilon = 1e-12);
        assert_relative_eq!(n[1], 1.0_f64.sin(), epsilon = 1e-12);
        assert_relative_eq!(norm(&n), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn flip_rate_above_one_is_rejected() {
        let params = Params::new().with("nematic", "").with("tau", 0.001);
        assert!(matches!(
            BrownianAlign::new(&params, 0.01),
            Err(Error::ProbabilityTooLarge { .. })
        ));
    }

    #[test]
    fn certain_flip_reverses_directors() {
        let mut fixture = Fixture::plane(3);
        let params = Params::new().with("nematic", "").with("tau", 0.01);
        let mut integrator = BrownianAlign::new(&params, 0.01).unwrap();
        assert!(integrator.is_nematic());
        integrator.pre_force(&mut fixture.ctx(0)).unwrap();
        for n in &fixture.particles.directors {
            assert_eq!(*n, [-1.0, 0.0, 0.0]);
        }
    }
}
