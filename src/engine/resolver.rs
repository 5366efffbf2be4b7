//! Turns relative strategy templates into absolute legs.
//!
//! One resolver covers both template styles: simple templates place strikes
//! with `ATM`/`OTM_*`/`ITM_*` descriptors and price premiums as a direct
//! fraction of the underlying, advanced templates use signed interval
//! multipliers and premiums scaled from a base premium unit.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{Leg, RelativeLegTemplate, RelativePosition, RelativeStrike};

pub const DEFAULT_ROUNDING_UNIT: f64 = 100.0;
pub const DEFAULT_STRIKE_OFFSET: f64 = 0.05;
pub const DEFAULT_STRIKE_INTERVAL: f64 = 0.02;
pub const DEFAULT_BASE_PREMIUM: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OffsetMode {
    /// One offset unit = underlying x `factor`.
    SimplePercent { factor: f64 },
    /// One offset unit = underlying x `interval_percent`.
    IntervalMultiplier { interval_percent: f64 },
}

impl OffsetMode {
    fn unit_fraction(self) -> f64 {
        match self {
            OffsetMode::SimplePercent { factor } => factor,
            OffsetMode::IntervalMultiplier { interval_percent } => interval_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PremiumMode {
    /// premium = underlying x factor
    DirectFactor,
    /// premium = underlying x `base_premium_percent` x factor
    ScaledFactor { base_premium_percent: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolverConfig {
    pub rounding_unit: f64,
    pub offset_mode: OffsetMode,
    pub premium_mode: PremiumMode,
}

impl ResolverConfig {
    /// 5% OTM/ITM offsets, premiums as a direct fraction of the underlying.
    pub fn simple() -> Self {
        Self {
            rounding_unit: DEFAULT_ROUNDING_UNIT,
            offset_mode: OffsetMode::SimplePercent {
                factor: DEFAULT_STRIKE_OFFSET,
            },
            premium_mode: PremiumMode::DirectFactor,
        }
    }

    /// 2% strike intervals, premiums as multiples of a 3% base premium.
    pub fn advanced() -> Self {
        Self {
            rounding_unit: DEFAULT_ROUNDING_UNIT,
            offset_mode: OffsetMode::IntervalMultiplier {
                interval_percent: DEFAULT_STRIKE_INTERVAL,
            },
            premium_mode: PremiumMode::ScaledFactor {
                base_premium_percent: DEFAULT_BASE_PREMIUM,
            },
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self.offset_mode {
            OffsetMode::SimplePercent { .. } => "simple",
            OffsetMode::IntervalMultiplier { .. } => "advanced",
        }
    }

    fn round_to_unit(&self, price: f64) -> f64 {
        if self.rounding_unit.is_finite() && self.rounding_unit > 0.0 {
            (price / self.rounding_unit).round() * self.rounding_unit
        } else {
            price
        }
    }

    /// Absolute strike for a relative descriptor.
    ///
    /// Unrecognized descriptors resolve to the raw underlying price.
    pub fn resolve_strike(&self, strike: &RelativeStrike, underlying: f64) -> f64 {
        let Some(units) = strike.units() else {
            tracing::warn!(
                descriptor = %strike,
                underlying,
                "Unrecognized strike descriptor, falling back to the underlying price"
            );
            return underlying;
        };
        let offset = underlying * self.offset_mode.unit_fraction() * f64::from(units);
        self.round_to_unit(underlying + offset)
    }

    /// Heuristic premium, never negative.
    pub fn resolve_premium(&self, premium_factor: f64, underlying: f64) -> f64 {
        let raw = match self.premium_mode {
            PremiumMode::DirectFactor => underlying * premium_factor,
            PremiumMode::ScaledFactor {
                base_premium_percent,
            } => underlying * base_premium_percent * premium_factor,
        };
        raw.round().max(0.0)
    }

    /// Futures always enter at the ATM rounding of the underlying; the
    /// descriptor is not applied.
    pub fn resolve_entry_price(&self, entry: &RelativeStrike, underlying: f64) -> f64 {
        if *entry != RelativeStrike::Atm {
            tracing::debug!(descriptor = %entry, "Future entry descriptor ignored, using ATM");
        }
        self.round_to_unit(underlying)
    }

    pub fn resolve_leg(&self, template: &RelativeLegTemplate, underlying: f64) -> Leg {
        match &template.position {
            RelativePosition::Option {
                option_type,
                strike,
                premium_factor,
            } => Leg::option(
                template.action,
                *option_type,
                self.resolve_strike(strike, underlying),
                self.resolve_premium(*premium_factor, underlying),
                template.quantity,
            ),
            RelativePosition::Future { entry } => Leg::future(
                template.action,
                self.resolve_entry_price(entry, underlying),
                template.quantity,
            ),
        }
    }

    pub fn resolve_legs(&self, templates: &[RelativeLegTemplate], underlying: f64) -> Vec<Leg> {
        templates
            .iter()
            .map(|t| self.resolve_leg(t, underlying))
            .collect()
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::simple()
    }
}
