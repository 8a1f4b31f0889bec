//! String-keyed parameter maps handed to component constructors.
//!
//! Values are kept as strings, exactly as a configuration front end would
//! deliver them, and parsed on demand. Falling back to a default is logged as
//! a warning so that a run's log records every implicit choice.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::Error;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, String>,
}
impl Params {
    pub fn new() -> Self {
        Self::default()
    }
    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }
    pub fn insert(&mut self, key: &str, value: impl Display) {
        self.values.insert(key.to_string(), value.to_string());
    }
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse `key` if present
    pub fn parse_opt<T: FromStr>(&self, key: &str, context: &str) -> Result<Option<T>, Error> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| Error::InvalidParameter {
                    context: context.to_string(),
                    key: key.to_string(),
                    value: value.clone(),
                }),
        }
    }
    /// Parse `key`, falling back to `default` with a warning
    pub fn parse_or<T: FromStr + Display>(
        &self,
        key: &str,
        default: T,
        context: &str,
    ) -> Result<T, Error> {
        match self.parse_opt(key, context)? {
            Some(value) => {
                log::info!("{}: setting {} to {}.", context, key, value);
                Ok(value)
            }
            None => {
                log::warn!("{}: {} not set, using default value {}.", context, key, default);
                Ok(default)
            }
        }
    }
    pub fn f64_opt(&self, key: &str, context: &str) -> Result<Option<f64>, Error> {
        self.parse_opt(key, context)
    }
    pub fn f64_or(&self, key: &str, default: f64, context: &str) -> Result<f64, Error> {
        self.parse_or(key, default, context)
    }
    pub fn usize_opt(&self, key: &str, context: &str) -> Result<Option<usize>, Error> {
        self.parse_opt(key, context)
    }
    pub fn usize_or(&self, key: &str, default: usize, context: &str) -> Result<usize, Error> {
        self.parse_or(key, default, context)
    }
    pub fn u64_or(&self, key: &str, default: u64, context: &str) -> Result<u64, Error> {
        self.parse_or(key, default, context)
    }
    pub fn string_or(&self, key: &str, default: &str, context: &str) -> String {
        match self.get_str(key) {
            Some(value) => value.trim().to_string(),
            None => {
                log::warn!("{}: {} not set, using default value {}.", context, key, default);
                default.to_string()
            }
        }
    }
    /// Flags are true when present with an empty value, or with one of
    /// `true`, `yes`, `1`; false when absent or set to `false`, `no`, `0`.
    pub fn bool_or(&self, key: &str, default: bool, context: &str) -> Result<bool, Error> {
        match self.get_str(key).map(str::trim) {
            None => Ok(default),
            Some("") | Some("true") | Some("yes") | Some("1") => Ok(true),
            Some("false") | Some("no") | Some("0") => Ok(false),
            Some(other) => Err(Error::InvalidParameter {
                context: context.to_string(),
                key: key.to_string(),
                value: other.to_string(),
            }),
        }
    }
    /// A `[0, 1]` probability
    pub fn probability_or(&self, key: &str, default: f64, context: &str) -> Result<f64, Error> {
        let p = self.f64_or(key, default, context)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidParameter {
                context: context.to_string(),
                key: key.to_string(),
                value: p.to_string(),
            });
        }
        Ok(p)
    }
    /// Strictly positive real
    pub fn positive_or(&self, key: &str, default: f64, context: &str) -> Result<f64, Error> {
        let x = self.f64_or(key, default, context)?;
        if !(x > 0.0 && x.is_finite()) {
            return Err(Error::InvalidParameter {
                context: context.to_string(),
                key: key.to_string(),
                value: x.to_string(),
            });
        }
        Ok(x)
    }

    /// Key/value pairs prefixed for the configuration record,
    /// e.g. `pair_potential.soft.k`.
    pub fn echo(&self, prefix: &str) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (format!("{}.{}", prefix, k), v.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_parse_and_default() {
        let params = Params::new().with("k", 10).with("a", "1.5").with("nematic", "");
        assert_eq!(params.f64_or("k", 1.0, "test").unwrap(), 10.0);
        assert_eq!(params.f64_or("a", 1.0, "test").unwrap(), 1.5);
        assert_eq!(params.f64_or("missing", 2.0, "test").unwrap(), 2.0);
        assert!(params.bool_or("nematic", false, "test").unwrap());
        assert!(!params.bool_or("polar", false, "test").unwrap());
    }

    #[test]
    fn parse_failure_names_the_key() {
        let params = Params::new().with("mu", "fast");
        let err = params.f64_or("mu", 1.0, "integrator brownian_pos").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidParameter {
                context: "integrator brownian_pos".into(),
                key: "mu".into(),
                value: "fast".into(),
            }
        );
    }

    #[test]
    fn probability_range_is_checked() {
        let params = Params::new().with("p", 1.5);
        assert!(params.probability_or("p", 0.0, "test").is_err());
    }

    #[test]
    fn echo_prefixes_keys() {
        let params: Params = [("k", 10.0), ("a", 1.0)].into_iter().collect();
        assert_eq!(
            params.echo("pair_potential.soft"),
            vec![
                ("pair_potential.soft.a".to_string(), "1".to_string()),
                ("pair_potential.soft.k".to_string(), "10".to_string()),
            ]
        );
    }
}
