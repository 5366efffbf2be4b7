//! The calculate pipeline: validate, plan the domain, sample, summarize.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::bounds::{leg_capability, LegCapability};
use super::domain::{plan_domain, DomainPlan, DEFAULT_SAMPLES};
use super::error::PayoffError;
use super::expected_move::{expected_move, ExpectedMove, DEFAULT_IMPLIED_VOLATILITY};
use super::payoff::{leg_payoff, payoff_curve, total_payoff};
use super::stats::extract_stats;
use super::types::{Leg, LegInput, PayoffCurve, StrategyStats};
use super::validate::{validate_days_to_expiration, validate_legs, validate_underlying};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    pub samples: usize,
    pub implied_volatility: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            implied_volatility: DEFAULT_IMPLIED_VOLATILITY,
        }
    }
}

/// Everything a chart needs for one leg set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PayoffAnalysis {
    pub underlying_price: f64,
    pub legs: Vec<Leg>,
    pub plan: DomainPlan,
    pub curve: PayoffCurve,
    pub stats: StrategyStats,
    pub capabilities: Vec<LegCapability>,
    pub expected_move: Option<ExpectedMove>,
    pub pnl_at_underlying: f64,
}

impl PayoffAnalysis {
    pub fn pnl_at(&self, price: f64) -> f64 {
        total_payoff(&self.legs, price)
    }
}

/// Validate raw legs and analyze them.
pub fn analyze(
    underlying: f64,
    days_to_expiration: Option<f64>,
    inputs: &[LegInput],
    settings: AnalysisSettings,
) -> Result<PayoffAnalysis, PayoffError> {
    validate_underlying(underlying)?;
    if let Some(dte) = days_to_expiration {
        validate_days_to_expiration(dte)?;
    }
    let legs = validate_legs(inputs)?;
    analyze_legs(underlying, days_to_expiration, legs, settings)
}

/// Analyze already-resolved legs (catalog output).
pub fn analyze_legs(
    underlying: f64,
    days_to_expiration: Option<f64>,
    legs: Vec<Leg>,
    settings: AnalysisSettings,
) -> Result<PayoffAnalysis, PayoffError> {
    validate_underlying(underlying)?;
    if legs.is_empty() {
        return Err(PayoffError::NoLegs);
    }

    let plan = plan_domain(underlying, &legs, settings.samples)?;
    let curve = payoff_curve(&legs, &plan.domain);
    if let Some(point) = curve.points.iter().find(|p| !p.pnl.is_finite()) {
        return Err(PayoffError::NonFiniteResult { price: point.price });
    }
    let pnl_at_underlying = finite_payoff(&legs, underlying)?;
    let stats = extract_stats(&curve, &legs);
    let expected_move = days_to_expiration
        .map(|dte| expected_move(underlying, dte, settings.implied_volatility))
        .transpose()?;

    tracing::debug!(
        legs = legs.len(),
        points = curve.len(),
        min = plan.domain.min,
        max = plan.domain.max,
        "Payoff analysis complete"
    );

    Ok(PayoffAnalysis {
        underlying_price: underlying,
        capabilities: legs.iter().map(leg_capability).collect(),
        pnl_at_underlying,
        legs,
        plan,
        curve,
        stats,
        expected_move,
    })
}

fn finite_payoff(legs: &[Leg], price: f64) -> Result<f64, PayoffError> {
    let pnl = total_payoff(legs, price);
    if pnl.is_finite() {
        Ok(pnl)
    } else {
        Err(PayoffError::NonFiniteResult { price })
    }
}

/// P&L of the current leg set at one price, broken down per leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceEvaluation {
    pub price: f64,
    pub total_pnl: f64,
    pub leg_pnls: Vec<f64>,
}

/// The last analyzed leg set, kept so a live price can be re-evaluated
/// without resolving templates again.
#[derive(Debug, Clone, PartialEq)]
pub struct LivePosition {
    pub underlying_price: f64,
    pub legs: Vec<Leg>,
    pub plan: DomainPlan,
}

impl LivePosition {
    pub fn from_analysis(analysis: &PayoffAnalysis) -> Self {
        Self {
            underlying_price: analysis.underlying_price,
            legs: analysis.legs.clone(),
            plan: analysis.plan,
        }
    }

    /// Evaluate at `price`. Any finite non-negative price is accepted, even
    /// outside the charted domain.
    pub fn evaluate(&self, price: f64) -> Result<PriceEvaluation, PayoffError> {
        if !(price.is_finite() && price >= 0.0) {
            return Err(PayoffError::InvalidUnderlying(price));
        }
        Ok(PriceEvaluation {
            price,
            total_pnl: finite_payoff(&self.legs, price)?,
            leg_pnls: self.legs.iter().map(|l| leg_payoff(l, price)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{Action, Bound, LegKind, OptionType};

    fn call_input(action: Action, strike: f64, premium: f64) -> LegInput {
        LegInput {
            kind: Some(LegKind::Option),
            action: Some(action),
            quantity: Some(1.0.into()),
            option_type: Some(OptionType::Call),
            strike: Some(strike.into()),
            premium: Some(premium.into()),
            entry_price: None,
        }
    }

    #[test]
    fn long_call_analysis() {
        let a = analyze(
            30_000.0,
            None,
            &[call_input(Action::Buy, 30_000.0, 900.0)],
            AnalysisSettings::default(),
        )
        .unwrap();
        assert_eq!(a.curve.len(), 201);
        assert_eq!(a.stats.max_profit, Bound::Unbounded);
        assert_eq!(a.stats.max_loss, Bound::Finite(-900.0));
        assert_eq!(a.stats.breakevens, vec![30_900.0]);
        assert!((a.pnl_at_underlying + 900.0).abs() < 1e-9);
        assert!((a.pnl_at(31_000.0) - 100.0).abs() < 1e-9);
        assert!(a.expected_move.is_none());
    }

    #[test]
    fn expected_move_only_with_dte() {
        let a = analyze(
            30_000.0,
            Some(365.0),
            &[call_input(Action::Buy, 30_000.0, 900.0)],
            AnalysisSettings::default(),
        )
        .unwrap();
        let m = a.expected_move.unwrap();
        assert!((m.one_sd - 30_000.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_dte_rejects_request() {
        let result = analyze(
            30_000.0,
            Some(0.0),
            &[call_input(Action::Buy, 30_000.0, 900.0)],
            AnalysisSettings::default(),
        );
        assert_eq!(result, Err(PayoffError::InvalidDaysToExpiration(0.0)));
    }

    #[test]
    fn invalid_underlying_checked_before_legs() {
        let result = analyze(-1.0, None, &[], AnalysisSettings::default());
        assert_eq!(result, Err(PayoffError::InvalidUnderlying(-1.0)));
    }

    #[test]
    fn no_legs_is_an_error() {
        assert_eq!(
            analyze_legs(30_000.0, None, Vec::new(), AnalysisSettings::default()),
            Err(PayoffError::NoLegs)
        );
    }

    #[test]
    fn overflowing_legs_are_rejected_before_stats() {
        let legs = vec![
            Leg::future(Action::Buy, 1e308, 2),
            Leg::future(Action::Sell, 1e308, 2),
        ];
        let result = analyze_legs(30_000.0, None, legs, AnalysisSettings::default());
        assert!(
            matches!(result, Err(PayoffError::NonFiniteResult { .. })),
            "{result:?}"
        );
    }

    #[test]
    fn live_evaluation_rejects_overflow() {
        let live = LivePosition {
            underlying_price: 30_000.0,
            legs: vec![Leg::future(Action::Buy, 30_000.0, u32::MAX)],
            plan: plan_domain(30_000.0, &[], DEFAULT_SAMPLES).unwrap(),
        };
        assert_eq!(
            live.evaluate(f64::MAX),
            Err(PayoffError::NonFiniteResult { price: f64::MAX })
        );
    }

    #[test]
    fn live_position_reuses_legs() {
        let a = analyze(
            30_000.0,
            None,
            &[
                call_input(Action::Buy, 29_000.0, 1_200.0),
                call_input(Action::Sell, 31_000.0, 300.0),
            ],
            AnalysisSettings::default(),
        )
        .unwrap();
        let live = LivePosition::from_analysis(&a);
        let eval = live.evaluate(50_000.0).unwrap();
        assert!((eval.total_pnl - 1_100.0).abs() < 1e-9);
        assert_eq!(eval.leg_pnls.len(), 2);
        assert!((eval.leg_pnls[0] - 19_800.0).abs() < 1e-9);
        assert!(live.evaluate(f64::NAN).is_err());
        assert!(live.evaluate(-1.0).is_err());
    }
}
