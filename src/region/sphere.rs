use rand::Rng;
use rand_distr::{Distribution, UnitSphere};

use super::Region;
use crate::{utils::*, Error};

/// Surface of a sphere, sampled uniformly
#[derive(Clone, Debug, PartialEq)]
pub struct SphereSurface {
    center: Vec3,
    radius: f64,
}
impl SphereSurface {
    pub fn new(center: Vec3, radius: f64) -> Result<Self, Error> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(Error::config(
                "sphere region",
                format!("radius should be positive, found {}", radius),
            ));
        }
        Ok(Self { center, radius })
    }
    pub fn center(&self) -> Vec3 {
        self.center
    }
    pub fn radius(&self) -> f64 {
        self.radius
    }
}
impl Region for SphereSurface {
    fn contains(&self, coord: &Vec3) -> bool {
        let r = distance_squared(coord, &self.center).sqrt();
        (r - self.radius).abs() <= 1e-10 * self.radius
    }
    fn random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let u: [f64; 3] = UnitSphere.sample(rng);
        add_scaled(&self.center, &u, self.radius)
    }
}
