//! Runtime configuration.
//!
//! Values come from an optional TOML file named by `PAYOFF_CONFIG`, then
//! individual environment variables on top.

use std::path::Path;

use anyhow::{Context, Result};
use garde::Validate;
use serde::Deserialize;

use crate::engine::analysis::AnalysisSettings;
use crate::engine::domain::{DEFAULT_SAMPLES, MAX_DOMAIN_POINTS};
use crate::engine::expected_move::DEFAULT_IMPLIED_VOLATILITY;
use crate::engine::resolver::{
    OffsetMode, ResolverConfig, DEFAULT_ROUNDING_UNIT, DEFAULT_STRIKE_OFFSET,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct PayoffConfig {
    /// Strikes and futures entries round to a multiple of this
    #[garde(range(min = 0.000_001))]
    pub rounding_unit: f64,
    /// OTM/ITM offset for simple strategies, as a fraction of the underlying
    #[garde(range(min = 0.0, max = 1.0))]
    pub strike_offset: f64,
    /// Chart samples per curve
    #[garde(range(min = 2, max = MAX_DOMAIN_POINTS))]
    pub samples: usize,
    /// Annualized volatility for the expected-move annotation
    #[garde(range(min = 0.0))]
    pub implied_volatility: f64,
    /// Serve over HTTP on this port instead of stdio
    #[garde(skip)]
    pub port: Option<u16>,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            rounding_unit: DEFAULT_ROUNDING_UNIT,
            strike_offset: DEFAULT_STRIKE_OFFSET,
            samples: DEFAULT_SAMPLES,
            implied_volatility: DEFAULT_IMPLIED_VOLATILITY,
            port: None,
        }
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value for {name}: {raw:?}"))
}

impl PayoffConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env var                | Default | Purpose                              |
    /// |------------------------|---------|--------------------------------------|
    /// | `PAYOFF_CONFIG`        | unset   | TOML file with the keys below        |
    /// | `PAYOFF_ROUNDING_UNIT` | `100`   | strike rounding unit                 |
    /// | `PAYOFF_STRIKE_OFFSET` | `0.05`  | OTM/ITM offset of simple strategies  |
    /// | `PAYOFF_SAMPLES`       | `200`   | chart samples                        |
    /// | `PAYOFF_IMPLIED_VOL`   | `1.0`   | expected-move volatility             |
    /// | `PORT`                 | unset   | serve streamable HTTP on this port   |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PayoffConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup("PAYOFF_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(raw) = lookup("PAYOFF_ROUNDING_UNIT") {
            config.rounding_unit = parse_var("PAYOFF_ROUNDING_UNIT", &raw)?;
        }
        if let Some(raw) = lookup("PAYOFF_STRIKE_OFFSET") {
            config.strike_offset = parse_var("PAYOFF_STRIKE_OFFSET", &raw)?;
        }
        if let Some(raw) = lookup("PAYOFF_SAMPLES") {
            config.samples = parse_var("PAYOFF_SAMPLES", &raw)?;
        }
        if let Some(raw) = lookup("PAYOFF_IMPLIED_VOL") {
            config.implied_volatility = parse_var("PAYOFF_IMPLIED_VOL", &raw)?;
        }
        if let Some(raw) = lookup("PORT") {
            config.port = Some(parse_var("PORT", &raw)?);
        }

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply the configured rounding unit, and for simple-percent templates
    /// the configured offset, to a strategy's resolver.
    pub fn resolver_for(&self, base: &ResolverConfig) -> ResolverConfig {
        let offset_mode = match base.offset_mode {
            OffsetMode::SimplePercent { .. } => OffsetMode::SimplePercent {
                factor: self.strike_offset,
            },
            other @ OffsetMode::IntervalMultiplier { .. } => other,
        };
        ResolverConfig {
            rounding_unit: self.rounding_unit,
            offset_mode,
            premium_mode: base.premium_mode,
        }
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            samples: self.samples,
            implied_volatility: self.implied_volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = PayoffConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PayoffConfig::default());
        assert_eq!(config.samples, 200);
        assert!(config.port.is_none());
    }

    #[test]
    fn env_overrides() {
        let config = PayoffConfig::from_lookup(lookup(&[
            ("PAYOFF_ROUNDING_UNIT", "50"),
            ("PAYOFF_SAMPLES", " 400 "),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.rounding_unit, 50.0);
        assert_eq!(config.samples, 400);
        assert_eq!(config.port, Some(8080));
    }

    #[test]
    fn unparsable_value_names_the_variable() {
        let err = PayoffConfig::from_lookup(lookup(&[("PAYOFF_SAMPLES", "lots")])).unwrap_err();
        assert!(err.to_string().contains("PAYOFF_SAMPLES"));
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        assert!(PayoffConfig::from_lookup(lookup(&[("PAYOFF_SAMPLES", "1")])).is_err());
        assert!(PayoffConfig::from_lookup(lookup(&[("PAYOFF_ROUNDING_UNIT", "0")])).is_err());
        assert!(PayoffConfig::from_lookup(lookup(&[("PAYOFF_STRIKE_OFFSET", "2")])).is_err());
    }

    #[test]
    fn file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rounding_unit = 10.0\nsamples = 100\nimplied_volatility = 0.6").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = PayoffConfig::from_lookup(lookup(&[
            ("PAYOFF_CONFIG", path.as_str()),
            ("PAYOFF_SAMPLES", "300"),
        ]))
        .unwrap();
        assert_eq!(config.rounding_unit, 10.0);
        assert_eq!(config.implied_volatility, 0.6);
        assert_eq!(config.samples, 300);
        assert_eq!(config.strike_offset, DEFAULT_STRIKE_OFFSET);
    }

    #[test]
    fn unknown_file_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rounding = 10.0").unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert!(PayoffConfig::from_lookup(lookup(&[("PAYOFF_CONFIG", path.as_str())])).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let env = lookup(&[("PAYOFF_CONFIG", "/nonexistent/payoff.toml")]);
        let err = PayoffConfig::from_lookup(env).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn resolver_for_keeps_interval_mode() {
        let config = PayoffConfig {
            rounding_unit: 50.0,
            strike_offset: 0.1,
            ..PayoffConfig::default()
        };
        let simple = config.resolver_for(&ResolverConfig::simple());
        assert_eq!(simple.rounding_unit, 50.0);
        assert_eq!(simple.offset_mode, OffsetMode::SimplePercent { factor: 0.1 });

        let advanced = config.resolver_for(&ResolverConfig::advanced());
        assert_eq!(advanced.rounding_unit, 50.0);
        assert_eq!(advanced.offset_mode, ResolverConfig::advanced().offset_mode);
        assert_eq!(advanced.premium_mode, ResolverConfig::advanced().premium_mode);
    }
}
