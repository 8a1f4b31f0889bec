use thiserror::Error;

/// Error types
///
/// Every variant is fatal for the run that produced it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// A component name that is not present in the registry
    #[error("unknown {kind} type `{name}`")]
    UnknownType { kind: &'static str, name: String },

    /// A component was configured before the ones it depends on
    #[error("{what} requires {missing} to be defined first")]
    MissingPrerequisite {
        what: &'static str,
        missing: &'static str,
    },

    /// A parameter value that could not be parsed or is out of range
    #[error("invalid value `{value}` for parameter `{key}` of {context}")]
    InvalidParameter {
        context: String,
        key: String,
        value: String,
    },

    /// Inconsistent configuration that is not tied to a single parameter
    #[error("{context}: {message}")]
    Config { context: String, message: String },

    /// Attempt probability of a stochastic process exceeds one
    #[error(
        "{process} probability {probability} is too large for the current \
         time step and attempt frequency"
    )]
    ProbabilityTooLarge {
        process: &'static str,
        probability: f64,
    },

    #[error("no particles left in the system")]
    EmptyPopulation,

    #[error("group info mismatch for group `{0}`")]
    GroupMismatch(String),

    /// Zero-length normals, coincident particles and similar modelling errors
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

impl Error {
    pub(crate) fn config(context: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            context: context.into(),
            message: message.into(),
        }
    }
}
