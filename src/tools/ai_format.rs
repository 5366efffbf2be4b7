use std::collections::HashMap;

use crate::engine::analysis::{LivePosition, PayoffAnalysis, PriceEvaluation};
use crate::engine::domain::PriceDomain;
use crate::engine::resolver::ResolverConfig;
use crate::engine::types::{Bound, Leg, RiskReward};
use crate::strategies::StrategyDef;

use super::response_types::{
    BuildStrategyResponse, EvaluatePriceResponse, LegPnl, PayoffResponse, PreviewResponse,
    StrategiesResponse, StrategyInfo, StrategyPreview,
};

fn format_pnl(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}")
    } else {
        format!("-{:.2}", value.abs())
    }
}

fn format_bound(bound: Bound) -> String {
    match bound {
        Bound::Finite(v) => format_pnl(v),
        Bound::Unbounded => "Unlimited".to_string(),
    }
}

fn format_breakevens(breakevens: &[f64]) -> String {
    if breakevens.is_empty() {
        return "none in range".to_string();
    }
    breakevens
        .iter()
        .map(|b| format!("{b:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn strategy_info(def: &StrategyDef) -> StrategyInfo {
    StrategyInfo {
        name: def.name.clone(),
        category: def.category.clone(),
        legs: def.legs.len(),
        description: def.description.clone(),
        resolver_mode: def.resolver.mode_name().to_string(),
        templates: def.legs.iter().map(ToString::to_string).collect(),
    }
}

pub fn format_strategies(strategies: Vec<StrategyInfo>) -> StrategiesResponse {
    let total = strategies.len();
    let mut categories: HashMap<String, usize> = HashMap::new();
    for s in &strategies {
        *categories.entry(s.category.clone()).or_default() += 1;
    }

    // Categories in catalog order.
    let mut seen: Vec<&str> = Vec::new();
    for s in &strategies {
        if !seen.contains(&s.category.as_str()) {
            seen.push(&s.category);
        }
    }
    let cat_parts: Vec<String> = seen
        .iter()
        .map(|cat| format!("{cat} ({})", categories.get(*cat).copied().unwrap_or(0)))
        .collect();

    let summary = format!(
        "{} strategies available across {} categories: {}.",
        total,
        categories.len(),
        cat_parts.join(", "),
    );

    StrategiesResponse {
        summary,
        total,
        categories,
        strategies,
        suggested_next_steps: vec![
            "Use build_strategy with a strategy name and underlying price to get editable legs"
                .to_string(),
            "Use calculate_payoff with a strategy name to chart it directly".to_string(),
            "Use preview_strategies to compare mini payoff curves of the whole catalog"
                .to_string(),
        ],
    }
}

pub fn format_build(
    def: &StrategyDef,
    legs: Vec<Leg>,
    underlying: f64,
    resolver: ResolverConfig,
) -> BuildStrategyResponse {
    let summary = format!(
        "{} resolved at underlying {underlying:.2} into {} leg(s) ({} pricing).",
        def.name,
        legs.len(),
        resolver.mode_name(),
    );
    BuildStrategyResponse {
        summary,
        strategy: def.name.clone(),
        underlying_price: underlying,
        resolver,
        legs,
        suggested_next_steps: vec![
            "Adjust strikes, premiums or quantities, then pass the legs to calculate_payoff"
                .to_string(),
        ],
    }
}

fn key_findings(analysis: &PayoffAnalysis) -> Vec<String> {
    let stats = &analysis.stats;
    let mut findings = Vec::new();

    match (stats.max_profit, stats.max_loss) {
        (Bound::Unbounded, Bound::Unbounded) => {
            findings.push("Both profit and loss are open-ended".to_string());
        }
        (Bound::Unbounded, _) => findings.push("Profit is open-ended, risk is capped".to_string()),
        (_, Bound::Unbounded) => findings.push("Loss is open-ended, profit is capped".to_string()),
        _ => findings.push("Defined-risk position: profit and loss are both capped".to_string()),
    }

    match stats.breakevens.len() {
        0 => findings.push("No breakeven inside the charted range".to_string()),
        1 => findings.push(format!("Single breakeven at {:.2}", stats.breakevens[0])),
        n => findings.push(format!(
            "{n} breakevens: {}",
            format_breakevens(&stats.breakevens)
        )),
    }

    if let Some(m) = &analysis.expected_move {
        let inside = stats
            .breakevens
            .iter()
            .filter(|b| **b >= m.minus_1sd && **b <= m.plus_1sd)
            .count();
        findings.push(format!(
            "1σ range {:.2}..{:.2} over {} days contains {inside} breakeven(s)",
            m.minus_1sd, m.plus_1sd, m.days_to_expiration
        ));
    }

    if analysis.plan.fallback_used {
        findings.push(
            "Price range could not be derived from the legs; a fixed-width range was used"
                .to_string(),
        );
    }

    findings
}

pub fn format_payoff(analysis: PayoffAnalysis) -> PayoffResponse {
    let stats = &analysis.stats;
    let risk_reward_label = stats.risk_reward.label();
    let summary = format!(
        "{} leg(s) at underlying {:.2}: max profit {}, max loss {}, breakevens {}, risk/reward {}.",
        analysis.legs.len(),
        analysis.underlying_price,
        format_bound(stats.max_profit),
        format_bound(stats.max_loss),
        format_breakevens(&stats.breakevens),
        risk_reward_label,
    );

    let mut suggested_next_steps = vec![
        "Use evaluate_price to read the P&L of these legs at any expiration price".to_string(),
    ];
    if matches!(stats.risk_reward, RiskReward::UnlimitedRisk | RiskReward::UnlimitedRiskReward) {
        suggested_next_steps.push(
            "Consider buying a further out-of-the-money option to cap the open-ended loss"
                .to_string(),
        );
    }
    if analysis.expected_move.is_none() {
        suggested_next_steps.push(
            "Pass days_to_expiration to add expected-move levels to the chart".to_string(),
        );
    }

    PayoffResponse {
        summary,
        key_findings: key_findings(&analysis),
        underlying_price: analysis.underlying_price,
        domain: analysis.plan.domain,
        slider_step: analysis.plan.slider_step,
        fallback_domain: analysis.plan.fallback_used,
        max_profit: stats.max_profit,
        max_loss: stats.max_loss,
        breakevens: stats.breakevens.clone(),
        risk_reward: stats.risk_reward,
        risk_reward_label,
        pnl_at_underlying: analysis.pnl_at_underlying,
        expected_move: analysis.expected_move,
        legs: analysis.legs,
        capabilities: analysis.capabilities,
        curve: analysis.curve.points,
        suggested_next_steps,
    }
}

pub fn format_evaluation(position: &LivePosition, eval: PriceEvaluation) -> EvaluatePriceResponse {
    let domain = position.plan.domain;
    let within_domain = eval.price >= domain.min && eval.price <= domain.max;
    let summary = format!(
        "P&L at {:.2}: {}{}",
        eval.price,
        format_pnl(eval.total_pnl),
        if within_domain {
            String::new()
        } else {
            format!(" (outside charted range {:.2}..{:.2})", domain.min, domain.max)
        }
    );
    let legs = position
        .legs
        .iter()
        .zip(eval.leg_pnls)
        .map(|(leg, pnl)| LegPnl {
            leg: leg.describe(),
            pnl,
        })
        .collect();

    EvaluatePriceResponse {
        summary,
        price: eval.price,
        total_pnl: eval.total_pnl,
        legs,
        within_domain,
    }
}

pub fn format_preview(
    underlying: f64,
    domain: PriceDomain,
    previews: Vec<StrategyPreview>,
) -> PreviewResponse {
    PreviewResponse {
        summary: format!(
            "{} preview curves over {:.2}..{:.2} ({} points each).",
            previews.len(),
            domain.min,
            domain.max,
            domain.len(),
        ),
        underlying_price: underlying,
        domain,
        previews,
    }
}
