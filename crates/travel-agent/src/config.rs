//! Configuration read from the process environment.

use std::error::Error as StdError;
use std::fmt::{self, Display};

use travel_agent_core::DEFAULT_MAX_TURNS;
use travel_agent_openai_model::{OpenAIConfig, OpenAIConfigBuilder};

use crate::providers::{DuffelConfig, DuffelConfigBuilder};

/// What went wrong while reading the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
    /// A required variable is not set.
    Missing,
    /// A variable is set to something unusable.
    Invalid,
}

/// Describes a configuration error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    var: &'static str,
    reason: Option<String>,
}

impl ConfigError {
    #[inline]
    fn missing(var: &'static str) -> Self {
        Self {
            kind: ConfigErrorKind::Missing,
            var,
            reason: None,
        }
    }

    #[inline]
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self {
            kind: ConfigErrorKind::Invalid,
            var,
            reason: Some(reason.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ConfigErrorKind {
        self.kind
    }

    /// Returns the name of the offending variable.
    #[inline]
    pub fn var(&self) -> &'static str {
        self.var
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.reason) {
            (ConfigErrorKind::Missing, _) => {
                write!(f, "{} environment variable is not set", self.var)
            }
            (ConfigErrorKind::Invalid, Some(reason)) => {
                write!(f, "{} is invalid: {reason}", self.var)
            }
            (ConfigErrorKind::Invalid, None) => {
                write!(f, "{} is invalid", self.var)
            }
        }
    }
}

impl StdError for ConfigError {}

/// Everything needed to assemble a [`TravelAgent`](crate::TravelAgent).
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Model backend settings.
    pub openai: OpenAIConfig,
    /// Flight backend settings. `None` disables flight actions.
    pub duffel: Option<DuffelConfig>,
    /// Turn limit of each dialogue run. `None` means unlimited.
    pub max_turns: Option<usize>,
}

impl AppConfig {
    /// Reads the configuration from environment variables.
    ///
    /// | Variable | |
    /// |---|---|
    /// | `OPENAI_API_KEY` | required |
    /// | `OPENAI_BASE_URL`, `OPENAI_MODEL` | optional |
    /// | `DUFFEL_ACCESS_TOKEN` | optional, enables flights |
    /// | `DUFFEL_BASE_URL`, `DUFFEL_VERSION` | optional |
    /// | `TRAVEL_AGENT_MAX_TURNS` | optional, `0` for no limit |
    ///
    /// Empty values count as unset.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](AppConfig::from_env), with variables looked up
    /// through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY")
            .ok_or(ConfigError::missing("OPENAI_API_KEY"))?;
        let mut openai = OpenAIConfigBuilder::with_api_key(api_key);
        if let Some(base_url) = get("OPENAI_BASE_URL") {
            openai = openai.with_base_url(base_url);
        }
        if let Some(model) = get("OPENAI_MODEL") {
            openai = openai.with_model(model);
        }

        let duffel = get("DUFFEL_ACCESS_TOKEN").map(|token| {
            let mut duffel = DuffelConfigBuilder::with_access_token(token);
            if let Some(base_url) = get("DUFFEL_BASE_URL") {
                duffel = duffel.with_base_url(base_url);
            }
            if let Some(version) = get("DUFFEL_VERSION") {
                duffel = duffel.with_version(version);
            }
            duffel.build()
        });

        let max_turns = match get("TRAVEL_AGENT_MAX_TURNS") {
            None => Some(DEFAULT_MAX_TURNS),
            Some(value) => match value.trim().parse::<usize>() {
                Ok(0) => None,
                Ok(max_turns) => Some(max_turns),
                Err(err) => {
                    return Err(ConfigError::invalid(
                        "TRAVEL_AGENT_MAX_TURNS",
                        err.to_string(),
                    ));
                }
            },
        };

        Ok(Self {
            openai: openai.build(),
            duffel,
            max_turns,
        })
    }
}
