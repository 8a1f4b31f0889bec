use crate::{
    external::{ExternalContext, ExternalPotential, ExternalPotentialTrait},
    pair::{PairContext, PairPotential, PairPotentialTrait, PairTerm},
    utils::{add_assign, norm_squared, sub_assign, KeyedVec, Vec3},
    Container, Error, NeighborList, Params, Particles,
};

/// All potentials acting in a simulation, keyed by name
///
/// Potentials compose additively: forces, torques and energies of every
/// registered pair and external potential are summed.
#[derive(Clone, Debug, Default)]
pub struct Potential {
    pair_potentials: KeyedVec<String, PairPotential>,
    external_potentials: KeyedVec<String, ExternalPotential>,
    pair_energies: KeyedVec<String, f64>,
    external_energies: KeyedVec<String, f64>,
}
impl Potential {
    pub fn new() -> Self {
        Self::default()
    }

    // Registration

    pub fn add_pair_potential(&mut self, name: &str, potential: PairPotential) {
        if self
            .pair_potentials
            .insert(name.to_string(), potential)
            .is_some()
        {
            log::warn!("Pair potential {} has already been added. Replacing it.", name);
        }
    }
    pub fn add_external_potential(&mut self, name: &str, potential: ExternalPotential) {
        if self
            .external_potentials
            .insert(name.to_string(), potential)
            .is_some()
        {
            log::warn!(
                "External potential {} has already been added. Replacing it.",
                name
            );
        }
    }
    pub fn set_pair_parameters(&mut self, name: &str, params: &Params) -> Result<(), Error> {
        self.pair_potentials
            .get_mut(name)
            .ok_or_else(|| Error::UnknownType {
                kind: "pair potential",
                name: name.to_string(),
            })?
            .set_parameters(params)
    }
    pub fn set_external_parameters(&mut self, name: &str, params: &Params) -> Result<(), Error> {
        self.external_potentials
            .get_mut(name)
            .ok_or_else(|| Error::UnknownType {
                kind: "external potential",
                name: name.to_string(),
            })?
            .set_parameters(params)
    }

    /// Check that every pair potential using the neighbor list acts within
    /// `cutoff`. Ranges set by particle radii use `largest_radius`.
    pub fn check_ranges(&self, cutoff: f64, largest_radius: f64) -> Result<(), Error> {
        for (name, potential) in self.pair_potentials.iter() {
            if !potential.needs_neighbor_list() {
                continue;
            }
            let range = potential.cutoff_distance(largest_radius);
            if range > cutoff {
                log::error!(
                    "Pair potential {} acts up to {}, beyond the neighbor list cutoff {}.",
                    name,
                    range,
                    cutoff
                );
                return Err(Error::config(
                    format!("pair potential {}", name),
                    format!(
                        "interaction range {} exceeds the neighbor list cutoff {}",
                        range, cutoff
                    ),
                ));
            }
        }
        Ok(())
    }

    // Getters

    pub fn is_empty(&self) -> bool {
        self.pair_potentials.is_empty() && self.external_potentials.is_empty()
    }
    pub fn pair_potentials(&self) -> &KeyedVec<String, PairPotential> {
        &self.pair_potentials
    }
    pub fn external_potentials(&self) -> &KeyedVec<String, ExternalPotential> {
        &self.external_potentials
    }
    /// Whether any pair potential needs spatial queries
    pub fn need_neighbor_list(&self) -> bool {
        self.pair_potentials
            .values()
            .any(PairPotentialTrait::needs_neighbor_list)
    }
    /// Energy of every potential from the last call to [`Potential::compute`],
    /// pair potentials first
    pub fn energies(&self) -> Vec<(String, f64)> {
        self.pair_energies
            .iter()
            .map(|(k, v)| (format!("pair.{}", k), *v))
            .chain(
                self.external_energies
                    .iter()
                    .map(|(k, v)| (format!("external.{}", k), *v)),
            )
            .collect()
    }

    // Computation

    /// Zero all forces and torques, then accumulate those of every potential.
    /// Returns the total potential energy.
    ///
    /// The neighbor list has to be current when a pair potential needs it.
    pub fn compute(
        &mut self,
        particles: &mut Particles,
        nlist: &NeighborList,
        container: &Container,
    ) -> Result<f64, Error> {
        let n = particles.len();
        let mut forces: Vec<Vec3> = vec![[0.0; 3]; n];
        let mut torques: Vec<Vec3> = vec![[0.0; 3]; n];
        let mut total = 0.0;

        let mut pair_energies = KeyedVec::new();
        for (name, potential) in self.pair_potentials.iter() {
            let mut energy = 0.0;
            visit_pairs(potential, particles, nlist, container, |i, j, term| {
                add_assign(&mut forces[i], &term.force);
                sub_assign(&mut forces[j], &term.force);
                add_assign(&mut torques[i], &term.torque_i);
                add_assign(&mut torques[j], &term.torque_j);
                energy += term.energy;
            })?;
            total += energy;
            pair_energies.insert(name.clone(), energy);
        }

        let mut external_energies = KeyedVec::new();
        for (name, potential) in self.external_potentials.iter() {
            let mut energy = 0.0;
            for i in 0..n {
                let term = potential.act(&external_context(particles, i));
                add_assign(&mut forces[i], &term.force);
                add_assign(&mut torques[i], &term.torque);
                energy += term.energy;
            }
            total += energy;
            external_energies.insert(name.clone(), energy);
        }

        particles.forces = forces;
        particles.torques = torques;
        self.pair_energies = pair_energies;
        self.external_energies = external_energies;
        Ok(total)
    }

    /// Energy of one pair potential, without touching forces
    pub fn compute_pair_potential_energy_of_type(
        &self,
        name: &str,
        particles: &Particles,
        nlist: &NeighborList,
        container: &Container,
    ) -> Result<f64, Error> {
        let potential = self
            .pair_potentials
            .get(name)
            .ok_or_else(|| Error::UnknownType {
                kind: "pair potential",
                name: name.to_string(),
            })?;
        let mut energy = 0.0;
        visit_pairs(potential, particles, nlist, container, |_, _, term| {
            energy += term.energy
        })?;
        Ok(energy)
    }
    /// Energy of one external potential, without touching forces
    pub fn compute_external_potential_energy_of_type(
        &self,
        name: &str,
        particles: &Particles,
    ) -> Result<f64, Error> {
        let potential = self
            .external_potentials
            .get(name)
            .ok_or_else(|| Error::UnknownType {
                kind: "external potential",
                name: name.to_string(),
            })?;
        Ok((0..particles.len())
            .map(|i| potential.act(&external_context(particles, i)).energy)
            .sum())
    }
}

fn external_context(particles: &Particles, i: usize) -> ExternalContext {
    ExternalContext {
        type_: particles.types()[i],
        position: particles.positions[i],
        director: particles.directors[i],
    }
}

/// Call `f` once for every interacting unordered pair `(i, j)`, `i < j`
fn visit_pairs<F>(
    potential: &PairPotential,
    particles: &Particles,
    nlist: &NeighborList,
    container: &Container,
    mut f: F,
) -> Result<(), Error>
where
    F: FnMut(usize, usize, &PairTerm),
{
    let n = particles.len();
    let use_list = potential.needs_neighbor_list();
    let all: Vec<usize> = if use_list { Vec::new() } else { (0..n).collect() };
    for i in 0..n {
        let candidates: &[usize] = if use_list {
            nlist.query(i)
        } else {
            &all[i + 1..]
        };
        for &j in candidates.iter().filter(|&&j| j > i) {
            let dr = container.displacement(&particles.positions[i], &particles.positions[j]);
            let r2 = norm_squared(&dr);
            if r2 == 0.0 {
                return Err(Error::Degenerate(format!(
                    "particles {} and {} are at the same position",
                    particles.ids()[i],
                    particles.ids()[j]
                )));
            }
            let pair = PairContext {
                type_i: particles.types()[i],
                type_j: particles.types()[j],
                radius_i: particles.radii()[i],
                radius_j: particles.radii()[j],
                director_i: particles.directors[i],
                director_j: particles.directors[j],
                dr,
                r2,
            };
            if let Some(term) = potential.interact(&pair) {
                f(i, j, &term);
            }
        }
    }
    Ok(())
}
