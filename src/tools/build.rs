use anyhow::Result;

use super::ai_format::format_build;
use super::response_types::BuildStrategyResponse;
use crate::config::PayoffConfig;
use crate::engine::error::PayoffError;
use crate::strategies::find_strategy;

pub fn execute(
    config: &PayoffConfig,
    strategy: &str,
    underlying: f64,
) -> Result<BuildStrategyResponse> {
    let def =
        find_strategy(strategy).ok_or_else(|| PayoffError::UnknownStrategy(strategy.to_string()))?;
    let resolver = config.resolver_for(&def.resolver);
    let legs = def.resolve_with(underlying, &resolver)?;
    tracing::info!(strategy, underlying, legs = legs.len(), "Strategy resolved");
    Ok(format_build(&def, legs, underlying, resolver))
}
