use anyhow::{bail, Result};

use super::ai_format::format_payoff;
use super::response_types::PayoffResponse;
use crate::config::PayoffConfig;
use crate::engine::analysis::{analyze, analyze_legs, LivePosition};
use crate::engine::error::PayoffError;
use crate::engine::types::LegInput;
use crate::engine::validate::validate_days_to_expiration;
use crate::strategies::find_strategy;

/// Where the legs of a calculation come from.
pub enum LegSource<'a> {
    Manual(&'a [LegInput]),
    Strategy(&'a str),
}

impl<'a> LegSource<'a> {
    /// Exactly one of `legs` and `strategy` must be given.
    pub fn from_parts(legs: Option<&'a [LegInput]>, strategy: Option<&'a str>) -> Result<Self> {
        match (legs, strategy) {
            (Some(legs), None) => Ok(LegSource::Manual(legs)),
            (None, Some(name)) => Ok(LegSource::Strategy(name)),
            (Some(_), Some(_)) => bail!("Provide either legs or strategy, not both"),
            (None, None) => Err(PayoffError::NoLegs.into()),
        }
    }
}

/// Run the calculation and return the response together with the leg set
/// to keep for `evaluate_price`.
pub fn execute(
    config: &PayoffConfig,
    underlying: f64,
    days_to_expiration: Option<f64>,
    source: LegSource<'_>,
    samples: Option<usize>,
) -> Result<(PayoffResponse, LivePosition)> {
    let mut settings = config.analysis_settings();
    if let Some(samples) = samples {
        settings.samples = samples;
    }

    let analysis = match source {
        LegSource::Manual(inputs) => analyze(underlying, days_to_expiration, inputs, settings)?,
        LegSource::Strategy(name) => {
            let def =
                find_strategy(name).ok_or_else(|| PayoffError::UnknownStrategy(name.to_string()))?;
            if let Some(dte) = days_to_expiration {
                validate_days_to_expiration(dte)?;
            }
            let legs = def.resolve_with(underlying, &config.resolver_for(&def.resolver))?;
            analyze_legs(underlying, days_to_expiration, legs, settings)?
        }
    };

    tracing::info!(
        legs = analysis.legs.len(),
        underlying,
        breakevens = analysis.stats.breakevens.len(),
        "Payoff calculated"
    );

    let position = LivePosition::from_analysis(&analysis);
    Ok((format_payoff(analysis), position))
}
