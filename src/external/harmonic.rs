use super::{particle_type, ExternalContext, ExternalPotentialTrait, ExternalTerm};
use crate::{
    utils::{norm_squared, scale, sub, TypeTable, Vec3},
    Error, Params,
};

const CONTEXT: &str = "external potential harmonic";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarmonicCoeff {
    pub k: f64,
    pub anchor: Vec3,
}

/// Harmonic tether to an anchor point, `U = k/2 |x - x0|^2`
#[derive(Clone, Debug)]
pub struct Harmonic {
    coeffs: TypeTable<HarmonicCoeff>,
}
impl Harmonic {
    pub fn new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            coeffs: TypeTable::new(Self::read_coeff(params)?),
        })
    }
    fn read_coeff(params: &Params) -> Result<HarmonicCoeff, Error> {
        Ok(HarmonicCoeff {
            k: params.f64_or("k", 1.0, CONTEXT)?,
            anchor: [
                params.f64_or("x0", 0.0, CONTEXT)?,
                params.f64_or("y0", 0.0, CONTEXT)?,
                params.f64_or("z0", 0.0, CONTEXT)?,
            ],
        })
    }
}
impl ExternalPotentialTrait for Harmonic {
    fn set_parameters(&mut self, params: &Params) -> Result<(), Error> {
        let coeff = Self::read_coeff(params)?;
        match particle_type(params, CONTEXT)? {
            Some(t) => self.coeffs.set(t, coeff),
            None => self.coeffs.set_global(coeff),
        }
        Ok(())
    }
    fn act(&self, particle: &ExternalContext) -> ExternalTerm {
        let coeff = self.coeffs.get(particle.type_);
        let dx = sub(&particle.position, &coeff.anchor);
        ExternalTerm {
            force: scale(&dx, -coeff.k),
            torque: [0.0; 3],
            energy: 0.5 * coeff.k * norm_squared(&dx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pulls_towards_anchor() {
        let harmonic = Harmonic::new(&Params::new().with("k", 2.0).with("z0", 1.0)).unwrap();
        let term = harmonic.act(&ExternalContext {
            type_: 1,
            position: [1.0, 0.0, 1.0],
            director: [0.0, 1.0, 0.0],
        });
        assert_eq!(term.force, [-2.0, 0.0, 0.0]);
        assert_relative_eq!(term.energy, 1.0);
    }
}
