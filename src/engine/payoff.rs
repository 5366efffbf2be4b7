use super::domain::PriceDomain;
use super::types::{Action, Instrument, Leg, OptionType, PayoffCurve, PayoffPoint};

/// P&L of one contract of `leg` if the underlying settles at `price`.
pub fn unit_payoff(leg: &Leg, price: f64) -> f64 {
    match leg.instrument {
        Instrument::Option {
            option_type,
            strike,
            premium,
        } => match (option_type, leg.action) {
            (OptionType::Call, Action::Buy) => (price - strike).max(0.0) - premium,
            (OptionType::Call, Action::Sell) => (strike - price).min(0.0) + premium,
            (OptionType::Put, Action::Buy) => (strike - price).max(0.0) - premium,
            (OptionType::Put, Action::Sell) => (price - strike).min(0.0) + premium,
        },
        Instrument::Future { entry_price } => match leg.action {
            Action::Buy => price - entry_price,
            Action::Sell => entry_price - price,
        },
    }
}

/// P&L of the whole leg (unit payoff times quantity).
pub fn leg_payoff(leg: &Leg, price: f64) -> f64 {
    unit_payoff(leg, price) * f64::from(leg.quantity)
}

/// Sum of leg payoffs at `price`, unrounded.
pub fn total_payoff(legs: &[Leg], price: f64) -> f64 {
    legs.iter().map(|leg| leg_payoff(leg, price)).sum()
}

/// Sample the total payoff at every price of `domain`.
pub fn payoff_curve(legs: &[Leg], domain: &PriceDomain) -> PayoffCurve {
    let points = domain
        .prices()
        .map(|price| PayoffPoint {
            price,
            pnl: total_payoff(legs, price),
        })
        .collect();
    PayoffCurve { points }
}
