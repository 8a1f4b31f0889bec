use super::ConstraintTrait;
use crate::{
    utils::{add_scaled, distance_squared, normalize, sub, Vec3},
    Error, Params,
};

const CONTEXT: &str = "constraint sphere";

/// Surface of a sphere
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
}
impl Sphere {
    pub fn new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            center: [
                params.f64_or("cx", 0.0, CONTEXT)?,
                params.f64_or("cy", 0.0, CONTEXT)?,
                params.f64_or("cz", 0.0, CONTEXT)?,
            ],
            radius: params.positive_or("r", 10.0, CONTEXT)?,
        })
    }
    pub fn center(&self) -> Vec3 {
        self.center
    }
    pub fn radius(&self) -> f64 {
        self.radius
    }
}
impl ConstraintTrait for Sphere {
    fn normal(&self, position: &Vec3) -> Result<Vec3, Error> {
        normalize(&sub(position, &self.center)).ok_or_else(|| {
            Error::Degenerate("surface normal is undefined at the sphere centre".into())
        })
    }
    fn project_position(&self, position: &Vec3) -> Result<Vec3, Error> {
        let n = self.normal(position)?;
        Ok(add_scaled(&self.center, &n, self.radius))
    }
    fn distance(&self, position: &Vec3) -> f64 {
        distance_squared(position, &self.center).sqrt() - self.radius
    }
}
