use super::helpers::*;

pub fn iron_butterfly() -> StrategyDef {
    strategy(
        "iron_butterfly",
        "Iron",
        "Sell ATM call and put, buy wings 2 intervals out",
        ResolverConfig::advanced(),
        vec![
            put_leg(Action::Buy, steps(-2), 0.35),
            put_leg(Action::Sell, steps(0), 1.0),
            call_leg(Action::Sell, steps(0), 1.0),
            call_leg(Action::Buy, steps(2), 0.35),
        ],
    )
}

pub fn iron_condor() -> StrategyDef {
    strategy(
        "iron_condor",
        "Iron",
        "Sell put and call 1 interval out, buy wings 3 intervals out",
        ResolverConfig::advanced(),
        vec![
            put_leg(Action::Buy, steps(-3), 0.2),
            put_leg(Action::Sell, steps(-1), 0.6),
            call_leg(Action::Sell, steps(1), 0.6),
            call_leg(Action::Buy, steps(3), 0.2),
        ],
    )
}

pub fn all() -> Vec<StrategyDef> {
    vec![iron_butterfly(), iron_condor()]
}
