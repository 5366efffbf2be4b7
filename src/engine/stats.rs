use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use super::bounds::position_bounds;
use super::types::{Bound, Leg, PayoffCurve, RiskReward, StrategyStats};

/// Reduce a sampled curve into summary statistics.
///
/// Finite extremes come from the samples, so their precision is bounded by
/// the sampling density; unbounded extremes come from the legs.
pub fn extract_stats(curve: &PayoffCurve, legs: &[Leg]) -> StrategyStats {
    let bounds = position_bounds(legs);

    let (sampled_max, sampled_min) = sampled_extrema(curve);
    let max_profit = if bounds.profit_unbounded {
        Bound::Unbounded
    } else {
        Bound::Finite(sampled_max)
    };
    let max_loss = if bounds.loss_unbounded {
        Bound::Unbounded
    } else {
        Bound::Finite(sampled_min)
    };

    StrategyStats {
        max_profit,
        max_loss,
        breakevens: find_breakevens(curve),
        risk_reward: classify_risk_reward(max_profit, max_loss),
    }
}

/// (max, min) of the sampled P&L; `(0, 0)` for an empty curve.
fn sampled_extrema(curve: &PayoffCurve) -> (f64, f64) {
    if curve.is_empty() {
        return (0.0, 0.0);
    }
    curve
        .pnls()
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), y| {
            (hi.max(y), lo.min(y))
        })
}

fn round_cents(x: f64) -> f64 {
    let rounded = (x * 100.0).round() / 100.0;
    // Normalise -0.0 so it deduplicates with 0.0.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Zero crossings of the curve, linearly interpolated between samples.
///
/// Exact zeros at a sample are taken as-is (except at price 0). Results are
/// rounded to 2 decimals, deduplicated and sorted ascending.
#[allow(clippy::float_cmp)]
pub fn find_breakevens(curve: &PayoffCurve) -> Vec<f64> {
    let points = &curve.points;
    if points.len() < 2 {
        return Vec::new();
    }

    let mut found: BTreeSet<OrderedFloat<f64>> = BTreeSet::new();
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.pnl * b.pnl < 0.0 {
            let x = a.price - a.pnl * (b.price - a.price) / (b.pnl - a.pnl);
            found.insert(OrderedFloat(round_cents(x)));
        } else if a.pnl == 0.0 && a.price != 0.0 {
            found.insert(OrderedFloat(round_cents(a.price)));
        }
    }
    if let Some(last) = points.last() {
        if last.pnl == 0.0 && last.price != 0.0 {
            found.insert(OrderedFloat(round_cents(last.price)));
        }
    }

    found.into_iter().map(OrderedFloat::into_inner).collect()
}

/// Classify risk/reward; the first matching rule wins.
#[allow(clippy::float_cmp)]
pub fn classify_risk_reward(max_profit: Bound, max_loss: Bound) -> RiskReward {
    let (profit, loss) = match (max_profit, max_loss) {
        (Bound::Unbounded, Bound::Unbounded) => return RiskReward::UnlimitedRiskReward,
        (Bound::Unbounded, Bound::Finite(_)) => return RiskReward::UnlimitedReward,
        (Bound::Finite(_), Bound::Unbounded) => return RiskReward::UnlimitedRisk,
        (Bound::Finite(p), Bound::Finite(l)) => (p, l),
    };

    if profit >= 0.0 && loss <= 0.0 {
        if profit > 0.0 && loss < 0.0 {
            RiskReward::Ratio(profit / loss.abs())
        } else if profit > 0.0 && loss == 0.0 {
            RiskReward::UnlimitedRewardLimitedRisk
        } else if profit == 0.0 && loss < 0.0 {
            RiskReward::ZeroReward
        } else {
            RiskReward::Flat
        }
    } else if profit > 0.0 && loss > 0.0 {
        RiskReward::AllProfit
    } else if profit < 0.0 && loss < 0.0 {
        RiskReward::AllLoss
    } else {
        RiskReward::NotApplicable
    }
}
