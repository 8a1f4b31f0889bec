//! Overdamped stochastic integrators.
//!
//! Every integrator acts on one group of particles and owns its own seeded
//! ChaCha12 stream, so a run is reproduced exactly by the same seeds and the
//! same sequence of steps.

mod brownian;
mod brownian_align;
mod brownian_pos;

pub use brownian::Brownian;
pub use brownian_align::BrownianAlign;
pub use brownian_pos::BrownianPos;

use enum_dispatch::enum_dispatch;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use rand_distr::StandardNormal;

use crate::{
    constraint::{Constraint, ConstraintTrait},
    utils::{add_assign, add_scaled, reject, scale, Vec3},
    Container, Error, Params, Particles,
};

/// Borrowed view of the simulation handed to integrators for one step
pub struct StepContext<'a> {
    pub particles: &'a mut Particles,
    pub container: &'a Container,
    pub constraint: &'a Constraint,
    pub dt: f64,
    pub step: usize,
}

/// Lifecycle of an integrator slot in a simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegratorState {
    Ready,
    Stepping,
    Disabled,
}

#[enum_dispatch]
#[derive(Clone, Debug)]
pub enum Integrator {
    BrownianPos,
    BrownianAlign,
    Brownian,
}
#[enum_dispatch(Integrator)]
/// Simulation integrator
pub trait IntegratorTrait {
    /// Registry name of the integrator
    fn name(&self) -> &'static str;

    /// Group of particles the integrator moves
    fn group(&self) -> &str;

    /// Called once per step before forces and torques are computed
    fn pre_force(&mut self, _ctx: &mut StepContext) -> Result<(), Error> {
        Ok(())
    }

    /// Advance the group by one time step using the current forces and torques
    fn integrate(&mut self, ctx: &mut StepContext) -> Result<(), Error>;
}

fn gaussian(rng: &mut ChaCha12Rng) -> f64 {
    rng.sample(StandardNormal)
}

/// Common parameters of the integrators
fn read_group(params: &Params, context: &str) -> String {
    params.string_or("group", crate::particles::GROUP_ALL, context)
}

/// Probability of a nematic flip per step, `dt / tau`
fn flip_probability(params: &Params, dt: f64, context: &str) -> Result<f64, Error> {
    let tau = params.positive_or("tau", 1.0, context)?;
    let probability = dt / tau;
    if probability > 1.0 {
        return Err(Error::ProbabilityTooLarge {
            process: "nematic flip",
            probability,
        });
    }
    Ok(probability)
}

/// Reverse the director of each group member with probability `probability`
fn nematic_flip(
    particles: &mut Particles,
    idxs: &[usize],
    probability: f64,
    rng: &mut ChaCha12Rng,
) {
    for &i in idxs {
        if rng.gen::<f64>() < probability {
            particles.directors[i] = scale(&particles.directors[i], -1.0);
        }
    }
}

/// Overdamped position update of one particle,
/// `x += dt (mu F_t + v0 n) + sqrt(2 mu T dt) xi_t`, then wrap and enforce
fn position_step(
    ctx: &mut StepContext,
    idx: usize,
    mu: f64,
    v0: f64,
    temperature: f64,
    rng: &mut ChaCha12Rng,
) -> Result<(), Error> {
    let force = ctx.constraint.project_force(ctx.particles, idx)?;
    let velocity = add_scaled(&scale(&force, mu), &ctx.particles.directors[idx], v0);
    let mut position = add_scaled(&ctx.particles.positions[idx], &velocity, ctx.dt);
    if temperature > 0.0 {
        let n = ctx.constraint.normal(&ctx.particles.positions[idx])?;
        let xi: Vec3 = [gaussian(rng), gaussian(rng), gaussian(rng)];
        let noise = scale(&reject(&xi, &n), (2.0 * mu * temperature * ctx.dt).sqrt());
        add_assign(&mut position, &noise);
    }
    ctx.container.wrap(&mut position);
    ctx.particles.positions[idx] = position;
    ctx.particles.velocities[idx] = velocity;
    ctx.constraint.enforce(ctx.particles, idx)
}

/// Rotational update of one director within the tangent plane,
/// `dtheta = dt mur tau_n + sqrt(nu dt) xi`
fn orientation_step(
    ctx: &mut StepContext,
    idx: usize,
    mur: f64,
    nu: f64,
    rng: &mut ChaCha12Rng,
) -> Result<(), Error> {
    let omega = mur * ctx.constraint.project_torque(ctx.particles, idx)?;
    let dtheta = ctx.dt * omega + (nu * ctx.dt).sqrt() * gaussian(rng);
    ctx.particles.omegas[idx] = omega;
    ctx.constraint.rotate_director(ctx.particles, idx, dtheta)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;
    use crate::{constraint::Plane, Particle};

    pub struct Fixture {
        pub particles: Particles,
        pub container: Container,
        pub constraint: Constraint,
    }
    impl Fixture {
        /// Particles on the `z = 0` plane in a periodic 20^3 box
        pub fn plane(n: usize) -> Self {
            let mut particles = Particles::new();
            for i in 0..n {
                particles.push(
                    Particle::new(1, [i as f64 - 5.0, 0.0, 0.0], [1.0, 0.0, 0.0], 0.5)
                        .with_group("active"),
                );
            }
            Self {
                particles,
                container: Container::from_lengths(20.0, 20.0, 20.0, true).unwrap(),
                constraint: Plane::new(&Params::new()).unwrap().into(),
            }
        }
        pub fn ctx(&mut self, step: usize) -> StepContext<'_> {
            StepContext {
                particles: &mut self.particles,
                container: &self.container,
                constraint: &self.constraint,
                dt: 0.01,
                step,
            }
        }
    }
}
