pub mod rect;
pub mod sphere;

pub use rect::Rect;
pub use sphere::SphereSurface;

use rand::Rng;

use crate::utils::Vec3;

/// A region of space used to place particles
pub trait Region {
    fn contains(&self, coord: &Vec3) -> bool;
    /// Uniformly distributed point of the region
    fn random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3;
}
