//! Structural (un)boundedness of payoffs.
//!
//! A sampled curve is always finite, so whether a position can lose or make
//! an unlimited amount is decided from the legs themselves. Each leg gets a
//! capability tag and the slopes of its payoff far out in both tails; the
//! slopes add up across legs, which is exact for piecewise-linear payoffs
//! and lets offsetting legs (spreads) cancel.
//!
//! Both tails are treated as open: a sold put uncaps loss just like a sold
//! call, and a bought put uncaps profit.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{Action, Bound, Instrument, Leg, OptionType};

const SLOPE_EPSILON: f64 = 1e-9;

/// d(P&L)/d(price) as price runs to -inf (`left`) and +inf (`right`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TailSlopes {
    pub left: f64,
    pub right: f64,
}

impl std::ops::Add for TailSlopes {
    type Output = TailSlopes;

    fn add(self, rhs: TailSlopes) -> TailSlopes {
        TailSlopes {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
        }
    }
}

impl std::iter::Sum for TailSlopes {
    fn sum<I: Iterator<Item = TailSlopes>>(iter: I) -> TailSlopes {
        iter.fold(TailSlopes::default(), |acc, s| acc + s)
    }
}

impl TailSlopes {
    /// Profit grows without limit in at least one tail.
    pub fn profit_unbounded(self) -> bool {
        self.right > SLOPE_EPSILON || self.left < -SLOPE_EPSILON
    }

    /// Loss grows without limit in at least one tail.
    pub fn loss_unbounded(self) -> bool {
        self.right < -SLOPE_EPSILON || self.left > SLOPE_EPSILON
    }
}

/// Per-leg capability tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LegCapability {
    pub max_gain: Bound,
    pub max_loss: Bound,
    pub tails: TailSlopes,
}

pub fn tail_slopes(leg: &Leg) -> TailSlopes {
    let q = f64::from(leg.quantity);
    let unit = match leg.instrument {
        Instrument::Option {
            option_type: OptionType::Call,
            ..
        } => TailSlopes {
            left: 0.0,
            right: 1.0,
        },
        Instrument::Option {
            option_type: OptionType::Put,
            ..
        } => TailSlopes {
            left: -1.0,
            right: 0.0,
        },
        Instrument::Future { .. } => TailSlopes {
            left: 1.0,
            right: 1.0,
        },
    };
    let sign = leg.action.multiplier();
    TailSlopes {
        left: unit.left * sign * q,
        right: unit.right * sign * q,
    }
}

pub fn leg_capability(leg: &Leg) -> LegCapability {
    let q = f64::from(leg.quantity);
    let (max_gain, max_loss) = match (leg.instrument, leg.action) {
        (Instrument::Option { premium, .. }, Action::Buy) => {
            (Bound::Unbounded, Bound::Finite(-premium * q))
        }
        (Instrument::Option { premium, .. }, Action::Sell) => {
            (Bound::Finite(premium * q), Bound::Unbounded)
        }
        (Instrument::Future { .. }, _) => (Bound::Unbounded, Bound::Unbounded),
    };
    LegCapability {
        max_gain,
        max_loss,
        tails: tail_slopes(leg),
    }
}

/// Whether profit and loss are unbounded for the position as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PositionBounds {
    pub profit_unbounded: bool,
    pub loss_unbounded: bool,
}

pub fn position_bounds(legs: &[Leg]) -> PositionBounds {
    let caps: Vec<LegCapability> = legs.iter().map(leg_capability).collect();
    // All legs capped on one side: the sum is capped too, no slope check needed.
    let all_gain_bounded = caps.iter().all(|c| !c.max_gain.is_unbounded());
    let all_loss_bounded = caps.iter().all(|c| !c.max_loss.is_unbounded());
    let tails: TailSlopes = caps.iter().map(|c| c.tails).sum();
    PositionBounds {
        profit_unbounded: !all_gain_bounded && tails.profit_unbounded(),
        loss_unbounded: !all_loss_bounded && tails.loss_unbounded(),
    }
}
