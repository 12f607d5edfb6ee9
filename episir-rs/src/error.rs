use crate::model::SirState;
use crate::Real;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building an observation series or solving the SIR
/// system. All of them are terminal for the request that triggered them; the
/// caller is expected to render a fallback for that panel rather than retry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no observations found for country {0:?}")]
    NoObservationsFound(String),

    #[error("country {0:?} is absent from the population table")]
    PopulationNotFound(String),

    #[error("country {0:?} matches {1} rows in the population table")]
    AmbiguousPopulation(String, usize),

    #[error("integration failed at t = {t}: non-finite state {state:?}")]
    IntegrationFailure { t: Real, state: SirState },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}
