use super::ConstraintTrait;
use crate::{
    utils::{add_scaled, dot, normalize, Vec3},
    Error, Params,
};

const CONTEXT: &str = "constraint plane";

/// Plane `n . x = d`
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    normal: Vec3,
    offset: f64,
}
impl Plane {
    pub fn new(params: &Params) -> Result<Self, Error> {
        let raw = [
            params.f64_or("nx", 0.0, CONTEXT)?,
            params.f64_or("ny", 0.0, CONTEXT)?,
            params.f64_or("nz", 1.0, CONTEXT)?,
        ];
        let normal = normalize(&raw)
            .ok_or_else(|| Error::config(CONTEXT, "plane normal must not be zero"))?;
        Ok(Self {
            normal,
            offset: params.f64_or("d", 0.0, CONTEXT)?,
        })
    }
}
impl ConstraintTrait for Plane {
    fn normal(&self, _position: &Vec3) -> Result<Vec3, Error> {
        Ok(self.normal)
    }
    fn project_position(&self, position: &Vec3) -> Result<Vec3, Error> {
        Ok(add_scaled(position, &self.normal, -self.distance(position)))
    }
    fn distance(&self, position: &Vec3) -> f64 {
        dot(&self.normal, position) - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn projects_along_normal() {
        let plane = Plane::new(&Params::new().with("nx", 0.0).with("nz", 2.0).with("d", 1.0))
            .unwrap();
        let p = plane.project_position(&[3.0, -1.0, 5.0]).unwrap();
        assert_eq!(p, [3.0, -1.0, 1.0]);
        assert_relative_eq!(plane.distance(&p), 0.0);
        assert!(Plane::new(&Params::new().with("nz", 0.0)).is_err());
    }
}
