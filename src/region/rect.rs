use rand::Rng;

use super::Region;
use crate::{utils::Vec3, Error};

/// Axis-aligned rectangular box
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    lo: Vec3,
    hi: Vec3,
}
impl Rect {
    pub fn new(xlo: f64, xhi: f64, ylo: f64, yhi: f64, zlo: f64, zhi: f64) -> Result<Self, Error> {
        let rect = Self {
            lo: [xlo, ylo, zlo],
            hi: [xhi, yhi, zhi],
        };
        for axis in 0..3 {
            if !(rect.hi[axis] > rect.lo[axis]) {
                return Err(Error::config(
                    "box",
                    format!(
                        "lower bound {} should be less than upper bound {} along axis {}",
                        rect.lo[axis], rect.hi[axis], axis
                    ),
                ));
            }
        }
        Ok(rect)
    }
    /// Box of the given side lengths centred on the origin
    pub fn centered(lx: f64, ly: f64, lz: f64) -> Result<Self, Error> {
        Self::new(
            -0.5 * lx,
            0.5 * lx,
            -0.5 * ly,
            0.5 * ly,
            -0.5 * lz,
            0.5 * lz,
        )
    }
    pub fn lo(&self) -> Vec3 {
        self.lo
    }
    pub fn hi(&self) -> Vec3 {
        self.hi
    }
    pub fn lx(&self) -> f64 {
        self.hi[0] - self.lo[0]
    }
    pub fn ly(&self) -> f64 {
        self.hi[1] - self.lo[1]
    }
    pub fn lz(&self) -> f64 {
        self.hi[2] - self.lo[2]
    }
    pub fn lengths(&self) -> Vec3 {
        [self.lx(), self.ly(), self.lz()]
    }
}
impl Region for Rect {
    fn contains(&self, coord: &Vec3) -> bool {
        (0..3).all(|i| self.lo[i] <= coord[i] && coord[i] <= self.hi[i])
    }
    fn random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        [
            rng.gen::<f64>() * self.lx() + self.lo[0],
            rng.gen::<f64>() * self.ly() + self.lo[1],
            rng.gen::<f64>() * self.lz() + self.lo[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(Rect::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0).is_err());
        assert!(Rect::new(0.0, 1.0, 0.0, 1.0, 2.0, 2.0).is_err());
    }

    #[test]
    fn random_coords_are_inside() {
        let rect = Rect::centered(4.0, 2.0, 1.0).unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(rect.contains(&rect.random_coord(&mut rng)));
        }
    }
}
