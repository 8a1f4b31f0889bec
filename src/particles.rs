use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand_distr::{Distribution, UnitSphere};

use crate::{region::Region, utils::Vec3};

/// Name of the group every particle implicitly belongs to
pub const GROUP_ALL: &str = "all";

/// A single particle, used to insert particles into the store and to take
/// snapshots of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Assigned by the store on insertion
    pub id: usize,
    pub type_: usize,
    pub position: Vec3,
    pub velocity: Vec3,
    pub director: Vec3,
    /// Angular velocity about the local surface normal
    pub omega: f64,
    pub force: Vec3,
    pub torque: Vec3,
    pub radius: f64,
    pub age: f64,
    pub groups: Vec<String>,
}
impl Particle {
    pub fn new(type_: usize, position: Vec3, director: Vec3, radius: f64) -> Self {
        Self {
            id: 0,
            type_,
            position,
            velocity: [0.0; 3],
            director,
            omega: 0.0,
            force: [0.0; 3],
            torque: [0.0; 3],
            radius,
            age: 0.0,
            groups: Vec::new(),
        }
    }
    pub fn with_group(mut self, group: &str) -> Self {
        if group != GROUP_ALL && !self.groups.iter().any(|g| g == group) {
            self.groups.push(group.to_string());
        }
        self
    }
    pub fn with_age(mut self, age: f64) -> Self {
        self.age = age;
        self
    }
}

/// Particle properties during simulation, stored as one vector per property
#[derive(Clone, Debug, Default)]
pub struct Particles {
    ids: Vec<usize>,
    types: Vec<usize>,
    radii: Vec<f64>,
    groups: Vec<Vec<String>>,
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub directors: Vec<Vec3>,
    pub omegas: Vec<f64>,
    pub forces: Vec<Vec3>,
    pub torques: Vec<Vec3>,
    pub ages: Vec<f64>,
    /// Recorded membership (particle ids) of every named group
    group_members: BTreeMap<String, BTreeSet<usize>>,
    next_id: usize,
}
impl Particles {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }
    pub fn types(&self) -> &[usize] {
        &self.types
    }
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }
    /// Largest radius in the store, 0 when empty
    pub fn max_radius(&self) -> f64 {
        self.radii.iter().copied().fold(0.0, f64::max)
    }
    pub fn groups(&self, idx: usize) -> &[String] {
        &self.groups[idx]
    }
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
    pub fn directors(&self) -> &[Vec3] {
        &self.directors
    }

    /// Snapshot of the particle stored at `idx`
    pub fn particle(&self, idx: usize) -> Particle {
        Particle {
            id: self.ids[idx],
            type_: self.types[idx],
            position: self.positions[idx],
            velocity: self.velocities[idx],
            director: self.directors[idx],
            omega: self.omegas[idx],
            force: self.forces[idx],
            torque: self.torques[idx],
            radius: self.radii[idx],
            age: self.ages[idx],
            groups: self.groups[idx].clone(),
        }
    }

    /// Append a particle, assigning it a fresh id. Returns its index.
    ///
    /// Ids grow monotonically, so an id is never handed out twice by the same
    /// store.
    pub fn push(&mut self, mut particle: Particle) -> usize {
        particle.id = self.next_id;
        self.next_id += 1;
        let mut groups: Vec<String> = Vec::with_capacity(particle.groups.len());
        for g in particle.groups {
            if g != GROUP_ALL && !groups.contains(&g) {
                groups.push(g);
            }
        }
        for g in &groups {
            self.group_members
                .entry(g.clone())
                .or_default()
                .insert(particle.id);
        }
        self.ids.push(particle.id);
        self.types.push(particle.type_);
        self.radii.push(particle.radius);
        self.groups.push(groups);
        self.positions.push(particle.position);
        self.velocities.push(particle.velocity);
        self.directors.push(particle.director);
        self.omegas.push(particle.omega);
        self.forces.push(particle.force);
        self.torques.push(particle.torque);
        self.ages.push(particle.age);
        self.ids.len() - 1
    }

    /// Add particles at the given coordinates with random directors
    pub fn add_particles<R: Rng + ?Sized>(
        &mut self,
        type_: usize,
        radius: f64,
        coords: Vec<Vec3>,
        rng: &mut R,
    ) -> Vec<usize> {
        coords
            .into_iter()
            .map(|coord| {
                let director: Vec3 = UnitSphere.sample(rng);
                self.push(Particle::new(type_, coord, director, radius))
            })
            .collect()
    }
    /// Add particles uniformly distributed over a region with random directors
    pub fn add_random_particles<R: Rng + ?Sized>(
        &mut self,
        region: &impl Region,
        num_particles: usize,
        type_: usize,
        radius: f64,
        rng: &mut R,
    ) -> Vec<usize> {
        let coords: Vec<Vec3> = (0..num_particles)
            .map(|_| region.random_coord(rng))
            .collect();
        self.add_particles(type_, radius, coords, rng)
    }

    /// Remove the particle stored at `idx`. Later particles shift down by one.
    pub fn remove(&mut self, idx: usize) -> Particle {
        let particle = self.particle(idx);
        for g in &particle.groups {
            if let Some(members) = self.group_members.get_mut(g) {
                members.remove(&particle.id);
            }
        }
        self.ids.remove(idx);
        self.types.remove(idx);
        self.radii.remove(idx);
        self.groups.remove(idx);
        self.positions.remove(idx);
        self.velocities.remove(idx);
        self.directors.remove(idx);
        self.omegas.remove(idx);
        self.forces.remove(idx);
        self.torques.remove(idx);
        self.ages.remove(idx);
        particle
    }
    /// Remove several particles. Indices refer to the store before any removal;
    /// they are applied in descending order so no index needs adjusting.
    pub fn remove_idxs(&mut self, mut idxs: Vec<usize>) -> Vec<Particle> {
        idxs.sort_unstable_by(|a, b| b.cmp(a));
        idxs.dedup();
        idxs.into_iter().map(|idx| self.remove(idx)).collect()
    }

    pub fn set_type(&mut self, idx: usize, type_: usize) {
        self.types[idx] = type_;
    }
    pub fn set_radius(&mut self, idx: usize, radius: f64) {
        self.radii[idx] = radius;
    }
    /// Move a particle from `old_group` (if it is a member) to `new_group`
    pub fn change_group(&mut self, idx: usize, old_group: Option<&str>, new_group: Option<&str>) {
        let id = self.ids[idx];
        if let Some(old) = old_group.filter(|g| *g != GROUP_ALL) {
            self.groups[idx].retain(|g| g != old);
            if let Some(members) = self.group_members.get_mut(old) {
                members.remove(&id);
            }
        }
        if let Some(new) = new_group.filter(|g| *g != GROUP_ALL) {
            if !self.groups[idx].iter().any(|g| g == new) {
                self.groups[idx].push(new.to_string());
            }
            self.group_members
                .entry(new.to_string())
                .or_default()
                .insert(id);
        }
    }
    pub fn in_group(&self, idx: usize, group: &str) -> bool {
        group == GROUP_ALL || self.groups[idx].iter().any(|g| g == group)
    }
    /// Store indices of the members of a group, in store order
    pub fn group_indices(&self, group: &str) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.in_group(i, group)).collect()
    }
    pub fn group_size(&self, group: &str) -> usize {
        if group == GROUP_ALL {
            self.len()
        } else {
            self.group_members.get(group).map_or(0, BTreeSet::len)
        }
    }
    /// Check that the recorded membership of a group agrees with the group
    /// tags carried by the particles
    pub fn group_ok(&self, group: &str) -> bool {
        if group == GROUP_ALL {
            return true;
        }
        let tagged: BTreeSet<usize> = (0..self.len())
            .filter(|&i| self.in_group(i, group))
            .map(|i| self.ids[i])
            .collect();
        let empty = BTreeSet::new();
        let recorded = self.group_members.get(group).unwrap_or(&empty);
        tagged == *recorded
    }

    pub fn reset_forces(&mut self) {
        self.forces.iter_mut().for_each(|f| *f = [0.0; 3]);
    }
    pub fn reset_torques(&mut self) {
        self.torques.iter_mut().for_each(|t| *t = [0.0; 3]);
    }
}
