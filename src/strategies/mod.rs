pub mod butterflies;
pub mod condors;
pub mod helpers;
pub mod iron;
pub mod singles;
pub mod spreads;
pub mod synthetics;
pub mod volatility;

use crate::engine::error::PayoffError;
use crate::engine::resolver::ResolverConfig;
use crate::engine::types::{Leg, RelativeLegTemplate};
use crate::engine::validate::validate_underlying;

/// A named strategy: ordered leg templates priced relative to the underlying.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyDef {
    pub name: String,
    pub category: String,
    pub description: String,
    pub resolver: ResolverConfig,
    pub legs: Vec<RelativeLegTemplate>,
}

impl StrategyDef {
    /// Resolve with the strategy's own resolver settings.
    pub fn resolve(&self, underlying: f64) -> Result<Vec<Leg>, PayoffError> {
        self.resolve_with(underlying, &self.resolver)
    }

    pub fn resolve_with(
        &self,
        underlying: f64,
        resolver: &ResolverConfig,
    ) -> Result<Vec<Leg>, PayoffError> {
        validate_underlying(underlying)?;
        Ok(resolver.resolve_legs(&self.legs, underlying))
    }
}

/// Every catalog strategy, in display order.
pub fn all_strategies() -> Vec<StrategyDef> {
    let mut strategies = Vec::new();
    strategies.extend(singles::all());
    strategies.extend(spreads::all());
    strategies.extend(volatility::all());
    strategies.extend(synthetics::all());
    strategies.extend(butterflies::all());
    strategies.extend(condors::all());
    strategies.extend(iron::all());
    strategies
}

pub fn strategy_names() -> Vec<String> {
    all_strategies().into_iter().map(|s| s.name).collect()
}

pub fn find_strategy(name: &str) -> Option<StrategyDef> {
    all_strategies().into_iter().find(|s| s.name == name)
}

pub fn resolve_strategy(name: &str, underlying: f64) -> Result<Vec<Leg>, PayoffError> {
    find_strategy(name)
        .ok_or_else(|| PayoffError::UnknownStrategy(name.to_string()))?
        .resolve(underlying)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bounds::position_bounds;
    use crate::engine::types::{Action, LegKind};

    #[test]
    fn all_strategies_returns_22() {
        assert_eq!(all_strategies().len(), 22);
    }

    #[test]
    fn names_keep_definition_order() {
        let names = strategy_names();
        assert_eq!(names[0], "long_call");
        assert_eq!(names.last().map(String::as_str), Some("iron_condor"));
    }

    #[test]
    fn find_strategy_known() {
        let s = find_strategy("long_call").unwrap();
        assert_eq!(s.legs.len(), 1);
        assert_eq!(s.legs[0].action, Action::Buy);
    }

    #[test]
    fn find_strategy_unknown_returns_none() {
        assert!(find_strategy("nonexistent_strategy").is_none());
    }

    #[test]
    fn resolve_unknown_strategy_errors() {
        assert_eq!(
            resolve_strategy("calendar_spread", 30_000.0),
            Err(PayoffError::UnknownStrategy("calendar_spread".to_string()))
        );
    }

    #[test]
    fn resolve_rejects_bad_underlying() {
        assert!(matches!(
            resolve_strategy("long_call", 0.0),
            Err(PayoffError::InvalidUnderlying(_))
        ));
    }

    #[test]
    fn all_strategies_have_unique_names() {
        let strategies = all_strategies();
        let mut names: Vec<&str> = strategies.iter().map(|s| s.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "Duplicate strategy names found");
    }

    #[test]
    fn every_strategy_resolves_to_valid_legs() {
        for s in all_strategies() {
            let legs = s.resolve(30_000.0).unwrap();
            assert_eq!(legs.len(), s.legs.len(), "{}", s.name);
            for leg in &legs {
                assert!(leg.quantity >= 1);
                if let Some(strike) = leg.strike() {
                    assert!(strike > 0.0, "{}: {}", s.name, leg.describe());
                    assert_eq!(strike % 100.0, 0.0, "{}: strike not rounded", s.name);
                }
            }
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        for s in all_strategies() {
            assert_eq!(s.resolve(27_345.0), s.resolve(27_345.0), "{}", s.name);
        }
    }

    #[test]
    fn defined_risk_strategies_are_bounded() {
        for name in [
            "bull_call_spread",
            "bear_call_spread",
            "bull_put_spread",
            "bear_put_spread",
            "long_call_butterfly",
            "long_put_butterfly",
            "long_call_condor",
            "long_put_condor",
            "iron_butterfly",
            "iron_condor",
        ] {
            let legs = resolve_strategy(name, 30_000.0).unwrap();
            let bounds = position_bounds(&legs);
            assert!(!bounds.profit_unbounded, "{name} profit should be capped");
            assert!(!bounds.loss_unbounded, "{name} loss should be capped");
        }
    }

    #[test]
    fn only_covered_call_holds_a_future() {
        for s in all_strategies() {
            let has_future = s
                .resolve(30_000.0)
                .unwrap()
                .iter()
                .any(|l| l.kind() == LegKind::Future);
            assert_eq!(has_future, s.name == "covered_call", "{}", s.name);
        }
    }

    #[test]
    fn configured_resolver_overrides_rounding() {
        let s = find_strategy("long_call").unwrap();
        let cfg = ResolverConfig {
            rounding_unit: 50.0,
            ..s.resolver
        };
        let legs = s.resolve_with(30_030.0, &cfg).unwrap();
        assert_eq!(legs[0].strike(), Some(30_050.0));
    }
}
