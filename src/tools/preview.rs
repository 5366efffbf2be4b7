use anyhow::Result;

use super::ai_format::format_preview;
use super::response_types::{PreviewResponse, StrategyPreview};
use crate::config::PayoffConfig;
use crate::engine::domain::preview_domain;
use crate::engine::payoff::payoff_curve;
use crate::strategies::all_strategies;

/// Mini curves for every catalog strategy over a narrow band around the
/// underlying. Extremes are the sampled ones; no unboundedness analysis.
pub fn execute(config: &PayoffConfig, underlying: f64) -> Result<PreviewResponse> {
    let domain = preview_domain(underlying)?;

    let mut previews = Vec::new();
    for def in all_strategies() {
        let legs = def.resolve_with(underlying, &config.resolver_for(&def.resolver))?;
        let curve = payoff_curve(&legs, &domain);
        let (max_profit, max_loss) = curve
            .pnls()
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), y| {
                (hi.max(y), lo.min(y))
            });
        previews.push(StrategyPreview {
            name: def.name,
            category: def.category,
            max_profit,
            max_loss,
            curve: curve.points,
        });
    }

    Ok(format_preview(underlying, domain, previews))
}
