use super::helpers::*;

/// Long call plus short put at the same strike; behaves like a long future
/// offset by the net premium.
pub fn synthetic_long() -> StrategyDef {
    strategy(
        "synthetic_long",
        "Synthetics",
        "Buy ATM call, sell ATM put. Replicates a long future on its own; \
         no future leg is added, which would double the exposure",
        ResolverConfig::simple(),
        vec![
            call_leg(Action::Buy, RelativeStrike::Atm, 0.03),
            put_leg(Action::Sell, RelativeStrike::Atm, 0.03),
        ],
    )
}

pub fn covered_call() -> StrategyDef {
    strategy(
        "covered_call",
        "Synthetics",
        "Buy a future at the money, sell an OTM call against it",
        ResolverConfig::simple(),
        vec![
            future_leg(Action::Buy, RelativeStrike::Atm),
            call_leg(Action::Sell, RelativeStrike::OtmCall, 0.02),
        ],
    )
}

pub fn all() -> Vec<StrategyDef> {
    vec![synthetic_long(), covered_call()]
}
