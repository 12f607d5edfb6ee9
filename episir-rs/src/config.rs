use crate::error::Result;
use crate::model::SirParams;
use crate::{Day, Real};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Run configuration for the demo binary, loaded from TOML.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub data_file: String,
    pub population_file: String,
    pub country: String,
    /// Discard dataset rows after this day, matching the explorer's frozen
    /// snapshot behavior.
    pub cutoff_day: Option<Day>,
    /// Optional overrides for the default coefficients, as entered in the
    /// dashboard's Beta/Gamma inputs.
    pub beta: Option<Real>,
    pub gamma: Option<Real>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: "data/all_data.csv".to_string(),
            population_file: "data/world_pop.csv".to_string(),
            country: "South Korea".to_string(),
            cutoff_day: Some("2020-04-02".to_string()),
            beta: None,
            gamma: None,
        }
    }
}

impl Config {
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(toml::from_str(&data)?)
    }

    /// Effective parameter set: defaults with any configured overrides.
    pub fn params(&self) -> SirParams {
        let mut params = SirParams::default();
        if let Some(beta) = self.beta {
            params.set_beta(beta);
        }
        if let Some(gamma) = self.gamma {
            params.set_gamma(gamma);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let config = Config::default();
        let data = toml::to_string(&config).unwrap();
        let config_: Config = toml::from_str(&data).unwrap();
        assert_eq!(config.country, config_.country);
        assert_eq!(config.cutoff_day, config_.cutoff_day);
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let config: Config = toml::from_str("country = 'Freedonia'\nbeta = 2e-7").unwrap();
        let params = config.params();
        assert_eq!(params.beta(), 2e-7);
        assert_eq!(params.gamma(), SirParams::default().gamma());
    }
}
