use crate::{
    neighbor::{Grid, UpdateSettings},
    utils::{get_sort_indices, key_start_offsets, norm_squared, Vec3},
    Container, Error, Particles,
};

/// Verlet neighbor list
///
/// Holds, for every particle, the store indices of all other particles within
/// `cutoff + pad`. The list stays a safe superset of the `cutoff` relation
/// while no particle has moved more than `pad / 2` since the last build.
#[derive(Clone, Debug)]
pub struct NeighborList {
    cutoff: f64,
    pad: f64,
    neighbors: Vec<Vec<usize>>,
    pos_at_build: Vec<Vec3>,
    is_built: bool,
    forced: bool,
    build_count: usize,
    pub update_settings: UpdateSettings,
}
impl NeighborList {
    pub fn new(cutoff: f64, pad: f64) -> Result<Self, Error> {
        if !(cutoff > 0.0 && cutoff.is_finite()) {
            return Err(Error::InvalidParameter {
                context: "neighbor list".into(),
                key: "rcut".into(),
                value: cutoff.to_string(),
            });
        }
        if !(pad >= 0.0 && pad.is_finite()) {
            return Err(Error::InvalidParameter {
                context: "neighbor list".into(),
                key: "pad".into(),
                value: pad.to_string(),
            });
        }
        Ok(Self {
            cutoff,
            pad,
            neighbors: Vec::new(),
            pos_at_build: Vec::new(),
            is_built: false,
            forced: false,
            build_count: 0,
            update_settings: UpdateSettings::new(),
        })
    }

    // Getters

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }
    pub fn pad(&self) -> f64 {
        self.pad
    }
    /// Distance up to which neighbors are recorded
    pub fn list_distance(&self) -> f64 {
        self.cutoff + self.pad
    }
    pub fn is_built(&self) -> bool {
        self.is_built
    }
    pub fn build_count(&self) -> usize {
        self.build_count
    }
    pub fn neighbors(&self) -> &[Vec<usize>] {
        &self.neighbors
    }

    /// Neighbors of the particle at `idx`, ascending
    pub fn query(&self, idx: usize) -> &[usize] {
        self.neighbors.get(idx).map_or(&[], Vec::as_slice)
    }
    /// Neighbors of the particle at `idx` as particle ids
    pub fn neighbor_ids(&self, idx: usize, particles: &Particles) -> Vec<usize> {
        self.query(idx)
            .iter()
            .map(|&j| particles.ids()[j])
            .collect()
    }

    /// Invalidate the list, so that the next check rebuilds it
    pub fn force_rebuild(&mut self) {
        self.forced = true;
    }
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// Whether the particle at `idx` moved more than half the padding since
    /// the last build
    pub fn need_update(&self, idx: usize, particles: &Particles, container: &Container) -> bool {
        if !self.is_built || self.forced || idx >= self.pos_at_build.len() {
            return true;
        }
        let half_pad = 0.5 * self.pad;
        let dr = container.displacement(&particles.positions[idx], &self.pos_at_build[idx]);
        norm_squared(&dr) > half_pad * half_pad
    }
    /// Whether any particle needs a rebuild
    pub fn any_need_update(&self, particles: &Particles, container: &Container) -> bool {
        if !self.is_built || self.forced || particles.len() != self.pos_at_build.len() {
            return true;
        }
        (0..particles.len()).any(|i| self.need_update(i, particles, container))
    }

    /// Rebuild the full relation for all particles
    pub fn build(&mut self, particles: &Particles, container: &Container) {
        let positions = particles.positions();
        self.neighbors = match Grid::new(container, self.list_distance()) {
            Some(grid) => self.binned_neighbors(&grid, positions, container),
            None => self.brute_force_neighbors(positions, container),
        };
        self.pos_at_build = positions.to_vec();
        self.is_built = true;
        self.forced = false;
        self.build_count += 1;
        log::debug!(
            "Built neighbor list for {} particles ({} builds so far).",
            positions.len(),
            self.build_count
        );
    }

    fn within(&self, a: &Vec3, b: &Vec3, container: &Container) -> bool {
        let rlist = self.list_distance();
        norm_squared(&container.displacement(a, b)) <= rlist * rlist
    }

    fn brute_force_neighbors(&self, positions: &[Vec3], container: &Container) -> Vec<Vec<usize>> {
        let n = positions.len();
        let mut neighbors = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                if self.within(&positions[i], &positions[j], container) {
                    neighbors[i].push(j);
                    neighbors[j].push(i);
                }
            }
        }
        neighbors
    }

    fn binned_neighbors(
        &self,
        grid: &Grid,
        positions: &[Vec3],
        container: &Container,
    ) -> Vec<Vec<usize>> {
        let num_bins = grid.total_num_bins();
        let bins: Vec<usize> = positions.iter().map(|p| grid.coord_to_bin_idx(p)).collect();
        let order = get_sort_indices(&bins);
        let starts = key_start_offsets(&bins, num_bins);

        let mut neighbors = vec![Vec::new(); positions.len()];
        for (i, pos) in positions.iter().enumerate() {
            for b in grid.stencil(bins[i]) {
                for &j in &order[starts[b]..starts[b + 1]] {
                    if j != i && self.within(pos, &positions[j], container) {
                        neighbors[i].push(j);
                    }
                }
            }
            neighbors[i].sort_unstable();
        }
        neighbors
    }
}
