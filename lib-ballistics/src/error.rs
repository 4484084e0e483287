use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;




// ============================================================================
#[derive(Debug, Error)]
pub enum Error {
    #[error("config field '{field}' {why}")]
    Config { field: &'static str, why: String },

    #[error("{record} record could not be read: {source}")]
    Record {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("propellant '{0}' was not found")]
    PropellantNotFound(String),

    #[error("propellant '{name}' has a missing or non-numeric field '{field}'")]
    MalformedPropellant { name: String, field: &'static str },

    #[error("the solution is not available: the solver has not finished")]
    NotSolved,

    #[error("numerical instability at step {step}: {what}")]
    NumericalInstability { step: usize, what: String },

    #[error("the projectile did not leave the barrel within {0} steps")]
    StepLimit(usize),

    #[error("{path} is not a trajectory archive: {why}")]
    BadArchive { path: PathBuf, why: String },

    #[error("archive encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn config(field: &'static str, why: impl Into<String>) -> Error {
        Error::Config { field, why: why.into() }
    }
}
