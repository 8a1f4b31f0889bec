use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use super::PopulationTrait;
use crate::{
    constraint::ConstraintTrait,
    integrators::StepContext,
    particles::GROUP_ALL,
    utils::{add_scaled, Vec3},
    Error, Params,
};

const CONTEXT: &str = "population random";

/// Age dependent random division and removal
///
/// On attempt steps every member of the group divides with probability
/// `age * division_rate * freq * dt` and dies with probability
/// `age * death_rate * freq * dt`.
#[derive(Clone, Debug)]
pub struct PopulationRandom {
    group: String,
    freq: usize,
    division_rate: f64,
    death_rate: f64,
    /// Fraction of the radius the child is placed ahead of the split point
    alpha: f64,
    change_prob_1: f64,
    change_prob_2: f64,
    new_type: Option<usize>,
    new_radius: Option<f64>,
    old_group: Option<String>,
    new_group: Option<String>,
    dt: f64,
    rng: ChaCha12Rng,
}
impl PopulationRandom {
    pub fn new(params: &Params, dt: f64) -> Result<Self, Error> {
        let population = Self {
            group: params.string_or("group", GROUP_ALL, CONTEXT),
            freq: params.usize_or("freq", 0, CONTEXT)?,
            division_rate: params.f64_or("division_rate", 0.0, CONTEXT)?,
            death_rate: params.f64_or("death_rate", 0.0, CONTEXT)?,
            alpha: params.probability_or("split_distance", 0.5, CONTEXT)?,
            change_prob_1: params.probability_or("change_prob_1", 0.0, CONTEXT)?,
            change_prob_2: params.probability_or("change_prob_2", 0.0, CONTEXT)?,
            new_type: params.usize_opt("new_type", CONTEXT)?.filter(|&t| t != 0),
            new_radius: params.f64_opt("new_radius", CONTEXT)?.filter(|&r| r != 0.0),
            old_group: params.get_str("old_group").map(|g| g.trim().to_string()),
            new_group: params.get_str("new_group").map(|g| g.trim().to_string()),
            dt,
            rng: ChaCha12Rng::seed_from_u64(params.u64_or("seed", 0, CONTEXT)?),
        };
        if population.division_rate < 0.0 || population.death_rate < 0.0 {
            return Err(Error::config(CONTEXT, "rates must not be negative"));
        }
        if let Some(r) = population.new_radius {
            if r < 0.0 {
                return Err(Error::InvalidParameter {
                    context: CONTEXT.into(),
                    key: "new_radius".into(),
                    value: r.to_string(),
                });
            }
        }
        population.division_probability()?;
        population.death_probability()?;
        Ok(population)
    }
    pub fn group(&self) -> &str {
        &self.group
    }
    pub fn freq(&self) -> usize {
        self.freq
    }
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Probability per unit age of dividing on an attempt step
    pub fn division_probability(&self) -> Result<f64, Error> {
        Self::checked("division", self.division_rate * self.freq as f64 * self.dt)
    }
    /// Probability per unit age of dying on an attempt step
    pub fn death_probability(&self) -> Result<f64, Error> {
        Self::checked("death", self.death_rate * self.freq as f64 * self.dt)
    }
    fn checked(process: &'static str, probability: f64) -> Result<f64, Error> {
        if probability > 1.0 {
            log::error!(
                "{}: {} probability {} is too large for current time step and attempt rate.",
                CONTEXT,
                process,
                probability
            );
            return Err(Error::ProbabilityTooLarge {
                process,
                probability,
            });
        }
        Ok(probability)
    }

    /// Apply the type, radius and group change to a child with probability
    /// `probability`
    fn mutate(&mut self, ctx: &mut StepContext, idx: usize, probability: f64) {
        if self.rng.gen::<f64>() < probability {
            if let Some(t) = self.new_type {
                ctx.particles.set_type(idx, t);
            }
            if let Some(r) = self.new_radius {
                ctx.particles.set_radius(idx, r);
            }
            ctx.particles
                .change_group(idx, self.old_group.as_deref(), self.new_group.as_deref());
        }
    }
}

fn split_point(position: &Vec3, director: &Vec3, distance: f64) -> Vec3 {
    add_scaled(position, director, distance)
}

impl PopulationTrait for PopulationRandom {
    fn name(&self) -> &'static str {
        "random"
    }
    fn attempts_at(&self, step: usize) -> bool {
        self.freq > 0 && step % self.freq == 0
    }

    fn divide(&mut self, ctx: &mut StepContext) -> Result<usize, Error> {
        if !self.attempts_at(ctx.step) {
            return Ok(0);
        }
        let probability = self.division_probability()?;
        let members = ctx.particles.group_indices(&self.group);
        let mut divided = 0;
        for i in members {
            if self.rng.gen::<f64>() >= ctx.particles.ages[i] * probability {
                continue;
            }
            let radius = ctx.particles.radii()[i];
            let director = ctx.particles.directors[i];
            let position = ctx.particles.positions[i];

            let mut child = ctx.particles.particle(i);
            child.position = split_point(&position, &director, self.alpha * radius);
            ctx.container.wrap(&mut child.position);
            child.age = 0.0;
            child.force = [0.0; 3];
            child.torque = [0.0; 3];

            let mut parent_position =
                split_point(&position, &director, -(1.0 - self.alpha) * radius);
            ctx.container.wrap(&mut parent_position);
            ctx.particles.positions[i] = parent_position;
            ctx.particles.ages[i] = 0.0;

            self.mutate(ctx, i, self.change_prob_1);
            let j = ctx.particles.push(child);
            self.mutate(ctx, j, self.change_prob_2);

            ctx.constraint.enforce(ctx.particles, i)?;
            ctx.constraint.enforce(ctx.particles, j)?;
            divided += 1;
        }
        if divided > 0 {
            log::info!(
                "{}: {} particles divided at step {}, {} particles in the system.",
                CONTEXT,
                divided,
                ctx.step,
                ctx.particles.len()
            );
        }
        Ok(divided)
    }

    fn remove(&mut self, ctx: &mut StepContext) -> Result<usize, Error> {
        if !self.attempts_at(ctx.step) {
            return Ok(0);
        }
        let probability = self.death_probability()?;
        let to_remove: Vec<usize> = ctx
            .particles
            .group_indices(&self.group)
            .into_iter()
            .filter(|&i| self.rng.gen::<f64>() < ctx.particles.ages[i] * probability)
            .collect();
        let removed = ctx.particles.remove_idxs(to_remove).len();

        if ctx.particles.is_empty() {
            log::error!(
                "{}: no particles left in the system. Please reduce the death rate.",
                CONTEXT
            );
            return Err(Error::EmptyPopulation);
        }
        if !ctx.particles.group_ok(&self.group) {
            return Err(Error::GroupMismatch(self.group.clone()));
        }
        if removed > 0 {
            log::info!(
                "{}: {} particles removed at step {}, {} particles in the system.",
                CONTEXT,
                removed,
                ctx.step,
                ctx.particles.len()
            );
        }
        Ok(removed)
    }
}
