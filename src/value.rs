//! Scalar sources for temperature control.
//!
//! Integrators read their noise strength through a [`Value`] so that the
//! strength can be held constant or ramped over a run without touching the
//! stochastic update rule itself.

use crate::{Error, Params};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Constant(f64),
    /// Linear interpolation from `start` to `end` over `steps` steps, then
    /// held at `end`.
    Linear { start: f64, end: f64, steps: usize },
}
impl Value {
    pub fn at(&self, step: usize) -> f64 {
        match *self {
            Value::Constant(v) => v,
            Value::Linear { start, end, steps } => {
                if steps == 0 || step >= steps {
                    end
                } else {
                    start + (end - start) * step as f64 / steps as f64
                }
            }
        }
    }

    /// Read a value from integrator parameters.
    ///
    /// `temperature_control = linear` reads `min_val`, `max_val` and `steps`;
    /// otherwise the constant `key` (or `default`) is used.
    pub fn from_params(
        params: &Params,
        key: &str,
        default: f64,
        context: &str,
    ) -> Result<Self, Error> {
        let control = params
            .get_str("temperature_control")
            .map(str::trim)
            .unwrap_or("constant");
        let value = match control {
            "constant" => Value::Constant(params.f64_or(key, default, context)?),
            "linear" => Value::Linear {
                start: params.f64_or("min_val", default, context)?,
                end: params.f64_or("max_val", default, context)?,
                steps: params.usize_or("steps", 0, context)?,
            },
            other => {
                return Err(Error::UnknownType {
                    kind: "temperature control",
                    name: other.to_string(),
                })
            }
        };
        match value {
            Value::Constant(v) | Value::Linear { start: v, .. } if v < 0.0 => {
                Err(Error::InvalidParameter {
                    context: context.to_string(),
                    key: key.to_string(),
                    value: v.to_string(),
                })
            }
            Value::Linear { end, .. } if end < 0.0 => Err(Error::InvalidParameter {
                context: context.to_string(),
                key: "max_val".to_string(),
                value: end.to_string(),
            }),
            _ => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_ramp_then_hold() {
        let v = Value::Linear {
            start: 1.0,
            end: 0.0,
            steps: 10,
        };
        assert_relative_eq!(v.at(0), 1.0);
        assert_relative_eq!(v.at(5), 0.5);
        assert_relative_eq!(v.at(10), 0.0);
        assert_relative_eq!(v.at(1000), 0.0);
    }

    #[test]
    fn from_params_picks_control() {
        let constant = Value::from_params(&Params::new().with("nu", 0.3), "nu", 1.0, "t").unwrap();
        assert_eq!(constant, Value::Constant(0.3));

        let linear = Params::new()
            .with("temperature_control", "linear")
            .with("min_val", 2.0)
            .with("max_val", 0.5)
            .with("steps", 100);
        assert_eq!(
            Value::from_params(&linear, "nu", 1.0, "t").unwrap(),
            Value::Linear {
                start: 2.0,
                end: 0.5,
                steps: 100
            }
        );

        let unknown = Params::new().with("temperature_control", "pid");
        assert!(Value::from_params(&unknown, "nu", 1.0, "t").is_err());
    }
}
