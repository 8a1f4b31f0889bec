use super::{particle_type, ExternalContext, ExternalPotentialTrait, ExternalTerm};
use crate::{utils::TypeTable, Error, Params};

const CONTEXT: &str = "external potential gravity";

/// Uniform gravity along `-z`, `U = g z`
#[derive(Clone, Debug)]
pub struct Gravity {
    g: TypeTable<f64>,
}
impl Gravity {
    pub fn new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            g: TypeTable::new(params.f64_or("g", 1.0, CONTEXT)?),
        })
    }
}
impl ExternalPotentialTrait for Gravity {
    fn set_parameters(&mut self, params: &Params) -> Result<(), Error> {
        let g = params.f64_or("g", 1.0, CONTEXT)?;
        match particle_type(params, CONTEXT)? {
            Some(t) => self.g.set(t, g),
            None => self.g.set_global(g),
        }
        Ok(())
    }
    fn act(&self, particle: &ExternalContext) -> ExternalTerm {
        let g = self.g.get(particle.type_);
        ExternalTerm {
            force: [0.0, 0.0, -g],
            torque: [0.0; 3],
            energy: g * particle.position[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_type_strength() {
        let mut gravity = Gravity::new(&Params::new().with("g", 2.0)).unwrap();
        gravity
            .set_parameters(&Params::new().with("type", 3).with("g", 5.0))
            .unwrap();
        let mut particle = ExternalContext {
            type_: 1,
            position: [0.0, 0.0, 1.5],
            director: [1.0, 0.0, 0.0],
        };
        assert_eq!(gravity.act(&particle).force, [0.0, 0.0, -2.0]);
        assert_eq!(gravity.act(&particle).energy, 3.0);
        particle.type_ = 3;
        assert_eq!(gravity.act(&particle).force, [0.0, 0.0, -5.0]);
    }
}
