use crate::{utils::Vec3, Container};

/// Neighbor list grid of bins
///
/// Bins are at least `min_bin_size` wide on every axis. A grid is only
/// created when every axis holds at least three bins, otherwise the 27-bin
/// stencil would visit some bins twice and brute force is just as fast.
#[derive(Clone, Debug)]
pub struct Grid {
    lo_corner: Vec3,
    bin_size: Vec3,
    num_bins: [usize; 3],
    periodic: bool,
}
impl Grid {
    pub fn new(container: &Container, min_bin_size: f64) -> Option<Self> {
        if !(min_bin_size > 0.0) {
            return None;
        }
        let lengths = container.lengths();
        let mut num_bins = [0usize; 3];
        let mut bin_size = [0.0; 3];
        for i in 0..3 {
            num_bins[i] = (lengths[i] / min_bin_size).floor() as usize;
            if num_bins[i] < 3 {
                return None;
            }
            bin_size[i] = lengths[i] / num_bins[i] as f64;
        }
        Some(Self {
            lo_corner: container.lo(),
            bin_size,
            num_bins,
            periodic: container.is_periodic(),
        })
    }
    pub fn num_bins(&self) -> [usize; 3] {
        self.num_bins
    }
    pub fn total_num_bins(&self) -> usize {
        self.num_bins[0] * self.num_bins[1] * self.num_bins[2]
    }
    pub fn bin_size(&self) -> Vec3 {
        self.bin_size
    }

    /// 3D bin index of a coordinate. Periodic grids wrap the index, others
    /// clamp it so particles that left the box land in the edge bins.
    pub fn coord_to_3d_idx(&self, coord: &Vec3) -> [usize; 3] {
        let mut inds = [0usize; 3];
        for i in 0..3 {
            let n = self.num_bins[i] as i64;
            let raw = ((coord[i] - self.lo_corner[i]) / self.bin_size[i]).floor() as i64;
            inds[i] = if self.periodic {
                raw.rem_euclid(n) as usize
            } else {
                raw.clamp(0, n - 1) as usize
            };
        }
        inds
    }
    pub fn coord_to_bin_idx(&self, coord: &Vec3) -> usize {
        self.bin_idx_from_3d_idx(&self.coord_to_3d_idx(coord))
    }
    pub fn bin_idx_from_3d_idx(&self, inds: &[usize; 3]) -> usize {
        inds[0] * self.num_bins[1] * self.num_bins[2] + inds[1] * self.num_bins[2] + inds[2]
    }
    pub fn bin_idx_to_3d_idx(&self, bin_idx: usize) -> [usize; 3] {
        [
            bin_idx / (self.num_bins[1] * self.num_bins[2]),
            (bin_idx / self.num_bins[2]) % self.num_bins[1],
            bin_idx % self.num_bins[2],
        ]
    }

    /// The bin itself and its (up to) 26 neighbors, ascending and without
    /// duplicates
    pub fn stencil(&self, bin_idx: usize) -> Vec<usize> {
        let center = self.bin_idx_to_3d_idx(bin_idx);
        let mut bins = Vec::with_capacity(27);
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                for dz in -1i64..=1 {
                    if let Some(inds) = self.shift(&center, [dx, dy, dz]) {
                        bins.push(self.bin_idx_from_3d_idx(&inds));
                    }
                }
            }
        }
        bins.sort_unstable();
        bins.dedup();
        bins
    }

    fn shift(&self, center: &[usize; 3], offset: [i64; 3]) -> Option<[usize; 3]> {
        let mut inds = [0usize; 3];
        for i in 0..3 {
            let n = self.num_bins[i] as i64;
            let j = center[i] as i64 + offset[i];
            if self.periodic {
                inds[i] = j.rem_euclid(n) as usize;
            } else if (0..n).contains(&j) {
                inds[i] = j as usize;
            } else {
                return None;
            }
        }
        Some(inds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_small_boxes_have_no_grid() {
        let c = Container::from_lengths(10.0, 10.0, 6.0, true).unwrap();
        assert!(Grid::new(&c, 2.0).is_some());
        assert!(Grid::new(&c, 2.9).is_none());
    }

    #[test]
    fn index_round_trip_and_wrap() {
        let c = Container::from_lengths(12.0, 9.0, 6.0, true).unwrap();
        let grid = Grid::new(&c, 3.0).unwrap();
        assert_eq!(grid.num_bins(), [4, 3, 3]);
        for b in 0..grid.total_num_bins() {
            assert_eq!(grid.bin_idx_from_3d_idx(&grid.bin_idx_to_3d_idx(b)), b);
        }
        assert_eq!(grid.coord_to_3d_idx(&[6.5, -4.5, 0.0]), [0, 0, 1]);
    }

    #[test]
    fn stencil_sizes() {
        let periodic = Container::from_lengths(12.0, 12.0, 12.0, true).unwrap();
        let fixed = Container::from_lengths(12.0, 12.0, 12.0, false).unwrap();
        let pgrid = Grid::new(&periodic, 3.0).unwrap();
        let fgrid = Grid::new(&fixed, 3.0).unwrap();
        assert_eq!(pgrid.stencil(0).len(), 27);
        assert_eq!(fgrid.stencil(0).len(), 8);
        assert_eq!(fgrid.coord_to_3d_idx(&[100.0, -100.0, 0.0]), [3, 0, 2]);
    }
}
