use crate::error::ConfigError;
use crate::model::TimeoutUnit;
use url::Url;


pub const API_ENV_KEY: &str = "FLYTE_API";
pub const TIMEOUT_UNIT_ENV_KEY: &str = "FLYTE_HTTP_TIMEOUT_UNIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_host: Option<Url>,
    pub timeout_unit: TimeoutUnit,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let api_host = match get(API_ENV_KEY) {
            Some(value) => Some(Url::parse(&value).map_err(|source| ConfigError::InvalidUrl {
                key: API_ENV_KEY,
                value: value.clone(),
                source,
            })?),
            None => None,
        };

        let timeout_unit = match get(TIMEOUT_UNIT_ENV_KEY) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidTimeoutUnit {
                    key: TIMEOUT_UNIT_ENV_KEY,
                    value: value.clone(),
                })?,
            None => TimeoutUnit::default(),
        };

        Ok(Config {
            api_host,
            timeout_unit,
        })
    }

    /// The flyte API this pack registers with; required to run as a pack.
    pub fn api_host(&self) -> Result<&Url, ConfigError> {
        self.api_host
            .as_ref()
            .ok_or(ConfigError::Missing(API_ENV_KEY))
    }
}
