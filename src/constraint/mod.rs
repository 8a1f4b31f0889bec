//! Analytic manifolds particles are confined to.
//!
//! A constraint is a pure operator: it owns only its geometry and acts on the
//! particles it is handed. After [`ConstraintTrait::enforce`] a particle sits
//! on the manifold and its director is a unit vector in the local tangent
//! plane.

pub mod plane;
pub mod sphere;

pub use plane::Plane;
pub use sphere::Sphere;

use enum_dispatch::enum_dispatch;

use crate::{
    utils::{add_scaled, cross, dot, normalize, reject, scale, Vec3},
    Error, Particles,
};

#[enum_dispatch]
#[derive(Clone, Debug)]
pub enum Constraint {
    Sphere,
    Plane,
}
#[enum_dispatch(Constraint)]
pub trait ConstraintTrait {
    /// Unit normal of the manifold at (the projection of) `position`
    fn normal(&self, position: &Vec3) -> Result<Vec3, Error>;

    /// Nearest point of the manifold
    fn project_position(&self, position: &Vec3) -> Result<Vec3, Error>;

    /// Signed distance from the manifold
    fn distance(&self, position: &Vec3) -> f64;

    /// Put a particle back on the manifold and make its director (and
    /// velocity) tangent
    fn enforce(&self, particles: &mut Particles, idx: usize) -> Result<(), Error> {
        let position = self.project_position(&particles.positions[idx])?;
        let n = self.normal(&position)?;
        let director = tangent_unit(&particles.directors[idx], &n).ok_or_else(|| {
            Error::Degenerate(format!(
                "director of particle {} is parallel to the surface normal",
                particles.ids()[idx]
            ))
        })?;
        particles.positions[idx] = position;
        particles.directors[idx] = director;
        particles.velocities[idx] = reject(&particles.velocities[idx], &n);
        Ok(())
    }
    fn enforce_all(&self, particles: &mut Particles) -> Result<(), Error> {
        (0..particles.len()).try_for_each(|i| self.enforce(particles, i))
    }

    /// Tangential part of the force on a particle
    fn project_force(&self, particles: &Particles, idx: usize) -> Result<Vec3, Error> {
        let n = self.normal(&particles.positions[idx])?;
        Ok(reject(&particles.forces[idx], &n))
    }

    /// Component of the torque along the local normal, the only part able to
    /// turn a tangent director within the surface
    fn project_torque(&self, particles: &Particles, idx: usize) -> Result<f64, Error> {
        let n = self.normal(&particles.positions[idx])?;
        Ok(dot(&particles.torques[idx], &n))
    }

    /// Rotate the director of a particle by `dtheta` about the local normal
    fn rotate_director(&self, particles: &mut Particles, idx: usize, dtheta: f64) -> Result<(), Error> {
        let n = self.normal(&particles.positions[idx])?;
        let rotated = rotate(&particles.directors[idx], &n, dtheta);
        particles.directors[idx] = tangent_unit(&rotated, &n).ok_or_else(|| {
            Error::Degenerate(format!(
                "director of particle {} is parallel to the surface normal",
                particles.ids()[idx]
            ))
        })?;
        Ok(())
    }
}

/// Rodrigues rotation of `v` by `angle` about the unit axis `k`
pub fn rotate(v: &Vec3, k: &Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    let rotated = add_scaled(&scale(v, c), &cross(k, v), s);
    add_scaled(&rotated, k, dot(k, v) * (1.0 - c))
}

/// Tangent part of `v` as a unit vector. `None` when `v` is (numerically)
/// parallel to `n`.
fn tangent_unit(v: &Vec3, n: &Vec3) -> Option<Vec3> {
    let t = reject(v, n);
    if dot(&t, &t) <= 1e-24 * dot(v, v) {
        return None;
    }
    normalize(&t)
}
