//! Training parameters for the line-fit driver.
//!
//! Defaults reproduce the classic demo (learning rate 0.1, 50 epochs). Each
//! field can be overridden with a `SCALARGRAD_`-prefixed environment variable.

use std::str::FromStr;

use crate::error::{GradError, Result};

pub const ENV_PREFIX: &str = "SCALARGRAD_";
pub const ENV_LEARNING_RATE: &str = "LEARNING_RATE";
pub const ENV_EPOCHS: &str = "EPOCHS";

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_EPOCHS: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
        }
    }
}

impl TrainConfig {
    /// Reads overrides from the process environment and validates the result.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TrainConfig::from_env`] with a custom source of variables,
    /// keyed by the full (prefixed) name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            learning_rate: parsed(&lookup, ENV_LEARNING_RATE)?.unwrap_or(defaults.learning_rate),
            epochs: parsed(&lookup, ENV_EPOCHS)?.unwrap_or(defaults.epochs),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0. {
            return Err(GradError::InvalidConfig(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(GradError::InvalidConfig(
                "epochs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, suffix: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let key = env_key(suffix);
    match lookup(&key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| GradError::EnvParse {
                key,
                value: raw.clone(),
                message: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (env_key(k), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = TrainConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, TrainConfig::default());
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.epochs, 50);
    }

    #[test]
    fn overrides() {
        let config =
            TrainConfig::from_lookup(lookup(&[("LEARNING_RATE", "0.05"), ("EPOCHS", " 200 ")]))
                .unwrap();
        assert_eq!(config.learning_rate, 0.05);
        assert_eq!(config.epochs, 200);
    }

    #[test]
    fn unparsable_value() {
        let err = TrainConfig::from_lookup(lookup(&[("EPOCHS", "many")])).unwrap_err();
        match err {
            GradError::EnvParse { key, value, .. } => {
                assert_eq!(key, "SCALARGRAD_EPOCHS");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            TrainConfig::from_lookup(lookup(&[("EPOCHS", "0")])),
            Err(GradError::InvalidConfig(_))
        ));
        assert!(matches!(
            TrainConfig::from_lookup(lookup(&[("LEARNING_RATE", "-1")])),
            Err(GradError::InvalidConfig(_))
        ));
        let nan = TrainConfig {
            learning_rate: f64::NAN,
            epochs: 1,
        };
        assert!(nan.validate().is_err());
    }
}
