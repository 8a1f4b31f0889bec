use super::{particle_type, ExternalContext, ExternalPotentialTrait, ExternalTerm};
use crate::{
    utils::{scale, TypeTable},
    Error, Params,
};

const CONTEXT: &str = "external potential self_propulsion";

/// Active force `alpha n` along the director. Carries no energy.
#[derive(Clone, Debug)]
pub struct SelfPropulsion {
    alpha: TypeTable<f64>,
}
impl SelfPropulsion {
    pub fn new(params: &Params) -> Result<Self, Error> {
        Ok(Self {
            alpha: TypeTable::new(params.f64_or("alpha", 1.0, CONTEXT)?),
        })
    }
}
impl ExternalPotentialTrait for SelfPropulsion {
    fn set_parameters(&mut self, params: &Params) -> Result<(), Error> {
        let alpha = params.f64_or("alpha", 1.0, CONTEXT)?;
        match particle_type(params, CONTEXT)? {
            Some(t) => self.alpha.set(t, alpha),
            None => self.alpha.set_global(alpha),
        }
        Ok(())
    }
    fn act(&self, particle: &ExternalContext) -> ExternalTerm {
        ExternalTerm {
            force: scale(&particle.director, self.alpha.get(particle.type_)),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushes_along_director() {
        let sp = SelfPropulsion::new(&Params::new().with("alpha", 0.5)).unwrap();
        let term = sp.act(&ExternalContext {
            type_: 2,
            position: [3.0, 0.0, 0.0],
            director: [0.0, 1.0, 0.0],
        });
        assert_eq!(term.force, [0.0, 0.5, 0.0]);
        assert_eq!(term.energy, 0.0);
    }
}
