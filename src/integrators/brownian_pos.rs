use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use super::{position_step, read_group, IntegratorTrait, StepContext};
use crate::{Error, Params, Value};

const CONTEXT: &str = "integrator brownian_pos";

/// Overdamped Brownian dynamics of positions with active self-propulsion
/// along the director
#[derive(Clone, Debug)]
pub struct BrownianPos {
    group: String,
    mu: f64,
    v0: f64,
    temperature: Value,
    rng: ChaCha12Rng,
}
impl BrownianPos {
    pub fn new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            group: read_group(params, CONTEXT),
            mu: params.f64_or("mu", 1.0, CONTEXT)?,
            v0: params.f64_or("v0", 1.0, CONTEXT)?,
            temperature: Value::from_params(params, "temperature", 0.0, CONTEXT)?,
            rng: ChaCha12Rng::seed_from_u64(params.u64_or("seed", 0, CONTEXT)?),
        })
    }
    pub fn mu(&self) -> f64 {
        self.mu
    }
    pub fn v0(&self) -> f64 {
        self.v0
    }
}
impl IntegratorTrait for BrownianPos {
    fn name(&self) -> &'static str {
        "brownian_pos"
    }
    fn group(&self) -> &str {
        &self.group
    }
    fn integrate(&mut self, ctx: &mut StepContext) -> Result<(), Error> {
        let temperature = self.temperature.at(ctx.step);
        for i in ctx.particles.group_indices(&self.group) {
            position_step(ctx, i, self.mu, self.v0, temperature, &mut self.rng)?;
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
    fn drifts_along_director_without_noise() {
        let mut fixture = Fixture::plane(3);
        fixture.particles.forces[1] = [0.0, 2.0, 5.0];
        let mut integrator = BrownianPos::new(&Params::new().with("v0", 0.5)).unwrap();
        integrator.integrate(&mut fixture.ctx(0)).unwrap();
        let p = fixture.particles.positions[1];
        // the normal part of the force is dropped
        assert_relative_eq!(p[0], -4.0 + 0.005);
        assert_relative_eq!(p[1], 0.02);
        assert_relative_eq!(p[2], 0.0);
    }

    #[test]
    fn only_the_group_moves() {
        let mut fixture = Fixture::plane(2);
        fixture.particles.change_group(0, Some("active"), None);
        let mut integrator = BrownianPos::new(&Params::new().with("group", "active")).unwrap();
        integrator.integrate(&mut fixture.ctx(0)).unwrap();
        assert_eq!(fixture.particles.positions[0], [-5.0, 0.0, 0.0]);
        assert_ne!(fixture.particles.positions[1], [-4.0, 0.0, 0.0]);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let params = Params::new().with("temperature", 0.5).with("seed", 7);
        let run = || {
            let mut fixture = Fixture::plane(4);
            let mut integrator = BrownianPos::new(&params).unwrap();
            for step in 0..20 {
                integrator.integrate(&mut fixture.ctx(step)).unwrap();
            }
            fixture.particles.positions
        };
        assert_eq!(run(), run());
    }
}
