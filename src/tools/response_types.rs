use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::engine::bounds::LegCapability;
use crate::engine::domain::PriceDomain;
use crate::engine::expected_move::ExpectedMove;
use crate::engine::resolver::ResolverConfig;
use crate::engine::types::{Bound, Leg, PayoffPoint, RiskReward};

/// Response for `list_strategies`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StrategiesResponse {
    pub summary: String,
    pub total: usize,
    pub categories: HashMap<String, usize>,
    pub strategies: Vec<StrategyInfo>,
    pub suggested_next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StrategyInfo {
    pub name: String,
    pub category: String,
    pub legs: usize,
    pub description: String,
    /// `simple` or `advanced`
    pub resolver_mode: String,
    /// Human-readable relative legs, e.g. "buy 1 call ATM (premium x0.03)"
    pub templates: Vec<String>,
}

/// Response for `build_strategy`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuildStrategyResponse {
    pub summary: String,
    pub strategy: String,
    pub underlying_price: f64,
    pub resolver: ResolverConfig,
    /// Absolute legs, ready to edit and pass to `calculate_payoff`
    pub legs: Vec<Leg>,
    pub suggested_next_steps: Vec<String>,
}

/// Response for `calculate_payoff`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PayoffResponse {
    pub summary: String,
    pub key_findings: Vec<String>,
    pub underlying_price: f64,
    pub legs: Vec<Leg>,
    /// Per-leg best/worst outcome and tail slopes, in leg order
    pub capabilities: Vec<LegCapability>,
    pub domain: PriceDomain,
    pub slider_step: f64,
    pub fallback_domain: bool,
    pub max_profit: Bound,
    pub max_loss: Bound,
    pub breakevens: Vec<f64>,
    pub risk_reward: RiskReward,
    pub risk_reward_label: String,
    pub pnl_at_underlying: f64,
    pub expected_move: Option<ExpectedMove>,
    pub curve: Vec<PayoffPoint>,
    pub suggested_next_steps: Vec<String>,
}

/// Response for `evaluate_price`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EvaluatePriceResponse {
    pub summary: String,
    pub price: f64,
    pub total_pnl: f64,
    pub legs: Vec<LegPnl>,
    /// `false` when the price lies outside the charted domain
    pub within_domain: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LegPnl {
    pub leg: String,
    pub pnl: f64,
}

/// Response for `preview_strategies`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PreviewResponse {
    pub summary: String,
    pub underlying_price: f64,
    pub domain: PriceDomain,
    pub previews: Vec<StrategyPreview>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StrategyPreview {
    pub name: String,
    pub category: String,
    pub max_profit: f64,
    pub max_loss: f64,
    pub curve: Vec<PayoffPoint>,
}
