use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy = 1,
    Sell = -1,
}

impl Action {
    pub fn multiplier(self) -> f64 {
        match self {
            Action::Buy => 1.0,
            Action::Sell => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Buy => "buy",
            Action::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    Option,
    Future,
}

/// Kind-specific part of a resolved leg. Only the fields of the active kind exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Instrument {
    Option {
        option_type: OptionType,
        strike: f64,
        premium: f64,
    },
    Future {
        entry_price: f64,
    },
}

/// A fully resolved position: absolute strike/premium or entry price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Leg {
    pub action: Action,
    pub quantity: u32,
    #[serde(flatten)]
    pub instrument: Instrument,
}

impl Leg {
    pub fn option(
        action: Action,
        option_type: OptionType,
        strike: f64,
        premium: f64,
        quantity: u32,
    ) -> Self {
        Self {
            action,
            quantity,
            instrument: Instrument::Option {
                option_type,
                strike,
                premium,
            },
        }
    }

    pub fn call(action: Action, strike: f64, premium: f64, quantity: u32) -> Self {
        Self::option(action, OptionType::Call, strike, premium, quantity)
    }

    pub fn put(action: Action, strike: f64, premium: f64, quantity: u32) -> Self {
        Self::option(action, OptionType::Put, strike, premium, quantity)
    }

    pub fn future(action: Action, entry_price: f64, quantity: u32) -> Self {
        Self {
            action,
            quantity,
            instrument: Instrument::Future { entry_price },
        }
    }

    pub fn kind(&self) -> LegKind {
        match self.instrument {
            Instrument::Option { .. } => LegKind::Option,
            Instrument::Future { .. } => LegKind::Future,
        }
    }

    /// Strike for option legs, `None` for futures.
    pub fn strike(&self) -> Option<f64> {
        match self.instrument {
            Instrument::Option { strike, .. } => Some(strike),
            Instrument::Future { .. } => None,
        }
    }

    pub fn describe(&self) -> String {
        match self.instrument {
            Instrument::Option {
                option_type,
                strike,
                premium,
            } => format!(
                "{} {} {} @ {strike} (premium {premium})",
                self.action.as_str(),
                self.quantity,
                option_type.as_str(),
            ),
            Instrument::Future { entry_price } => format!(
                "{} {} future @ {entry_price}",
                self.action.as_str(),
                self.quantity
            ),
        }
    }
}

/// A numeric form field as it arrived: a JSON number, or anything else
/// (numeric strings included) to be read during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Other(serde_json::Value),
}

impl NumberInput {
    /// The numeric value, if the field holds one. `"30000"` reads as 30000.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberInput::Number(v) => Some(*v),
            NumberInput::Other(serde_json::Value::String(s)) => s.trim().parse().ok(),
            NumberInput::Other(_) => None,
        }
    }
}

impl From<f64> for NumberInput {
    fn from(v: f64) -> Self {
        NumberInput::Number(v)
    }
}

impl fmt::Display for NumberInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberInput::Number(v) => write!(f, "{v}"),
            NumberInput::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Raw leg specification as typed into a form. Every field may be missing
/// and numeric fields may hold junk; `engine::validate` turns it into a
/// `Leg` or a per-leg error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LegInput {
    /// `option` or `future`
    #[serde(default)]
    pub kind: Option<LegKind>,
    /// `buy` or `sell`
    #[serde(default)]
    pub action: Option<Action>,
    /// Positive whole number of contracts
    #[serde(default)]
    #[schemars(with = "Option<u32>")]
    pub quantity: Option<NumberInput>,
    /// `call` or `put` (options only)
    #[serde(default)]
    pub option_type: Option<OptionType>,
    /// Strike price (options only)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub strike: Option<NumberInput>,
    /// Premium per contract (options only)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub premium: Option<NumberInput>,
    /// Entry price (futures only)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub entry_price: Option<NumberInput>,
}

impl From<Leg> for LegInput {
    fn from(leg: Leg) -> Self {
        let mut input = LegInput {
            kind: Some(leg.kind()),
            action: Some(leg.action),
            quantity: Some(f64::from(leg.quantity).into()),
            ..LegInput::default()
        };
        match leg.instrument {
            Instrument::Option {
                option_type,
                strike,
                premium,
            } => {
                input.option_type = Some(option_type);
                input.strike = Some(strike.into());
                input.premium = Some(premium.into());
            }
            Instrument::Future { entry_price } => input.entry_price = Some(entry_price.into()),
        }
        input
    }
}

/// Strike placement relative to the underlying price.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelativeStrike {
    Atm,
    OtmCall,
    ItmCall,
    OtmPut,
    ItmPut,
    /// Signed number of offset units away from the underlying (e.g. `-3..=3`).
    Intervals(i32),
    /// Kept verbatim; resolves to the raw underlying price.
    Unrecognized(String),
}

impl RelativeStrike {
    /// Offset units away from the underlying, `None` for unrecognized descriptors.
    pub fn units(&self) -> Option<i32> {
        match self {
            RelativeStrike::Atm => Some(0),
            RelativeStrike::OtmCall | RelativeStrike::ItmPut => Some(1),
            RelativeStrike::ItmCall | RelativeStrike::OtmPut => Some(-1),
            RelativeStrike::Intervals(n) => Some(*n),
            RelativeStrike::Unrecognized(_) => None,
        }
    }
}

impl std::str::FromStr for RelativeStrike {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.to_ascii_uppercase().as_str() {
            "ATM" => RelativeStrike::Atm,
            "OTM_CALL" => RelativeStrike::OtmCall,
            "ITM_CALL" => RelativeStrike::ItmCall,
            "OTM_PUT" => RelativeStrike::OtmPut,
            "ITM_PUT" => RelativeStrike::ItmPut,
            other => match other.strip_prefix('+').unwrap_or(other).parse::<i32>() {
                Ok(n) => RelativeStrike::Intervals(n),
                Err(_) => RelativeStrike::Unrecognized(trimmed.to_string()),
            },
        };
        Ok(parsed)
    }
}

impl fmt::Display for RelativeStrike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeStrike::Atm => write!(f, "ATM"),
            RelativeStrike::OtmCall => write!(f, "OTM_CALL"),
            RelativeStrike::ItmCall => write!(f, "ITM_CALL"),
            RelativeStrike::OtmPut => write!(f, "OTM_PUT"),
            RelativeStrike::ItmPut => write!(f, "ITM_PUT"),
            RelativeStrike::Intervals(n) => write!(f, "{n:+}"),
            RelativeStrike::Unrecognized(raw) => write!(f, "{raw}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelativePosition {
    Option {
        option_type: OptionType,
        strike: RelativeStrike,
        /// Fraction of the underlying (direct mode) or multiplier of the base
        /// premium unit (scaled mode).
        premium_factor: f64,
    },
    Future {
        entry: RelativeStrike,
    },
}

/// One leg of a catalog strategy, priced relative to the underlying.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeLegTemplate {
    pub action: Action,
    pub quantity: u32,
    pub position: RelativePosition,
}

impl fmt::Display for RelativeLegTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            RelativePosition::Option {
                option_type,
                strike,
                premium_factor,
            } => write!(
                f,
                "{} {} {} {strike} (premium x{premium_factor})",
                self.action.as_str(),
                self.quantity,
                option_type.as_str()
            ),
            RelativePosition::Future { entry } => write!(
                f,
                "{} {} future {entry}",
                self.action.as_str(),
                self.quantity
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PayoffPoint {
    pub price: f64,
    pub pnl: f64,
}

/// Total P&L sampled over an evenly spaced, ascending price grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PayoffCurve {
    pub points: Vec<PayoffPoint>,
}

impl PayoffCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    pub fn pnls(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.pnl)
    }
}

/// An extreme of the payoff: a sampled finite value or structurally unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Bound {
    Finite(f64),
    Unbounded,
}

impl Bound {
    pub fn is_unbounded(self) -> bool {
        matches!(self, Bound::Unbounded)
    }

    pub fn finite(self) -> Option<f64> {
        match self {
            Bound::Finite(v) => Some(v),
            Bound::Unbounded => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(v) => write!(f, "{v:.2}"),
            Bound::Unbounded => write!(f, "Unlimited"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RiskReward {
    UnlimitedRiskReward,
    UnlimitedReward,
    UnlimitedRisk,
    /// `max_profit / |max_loss|`
    Ratio(f64),
    UnlimitedRewardLimitedRisk,
    ZeroReward,
    Flat,
    AllProfit,
    AllLoss,
    NotApplicable,
}

impl RiskReward {
    pub fn label(self) -> String {
        match self {
            RiskReward::UnlimitedRiskReward => "unlimited risk/reward".to_string(),
            RiskReward::UnlimitedReward => "unlimited reward".to_string(),
            RiskReward::UnlimitedRisk => "unlimited risk".to_string(),
            RiskReward::Ratio(r) => format!("{r:.2}"),
            RiskReward::UnlimitedRewardLimitedRisk => {
                "unlimited reward (limited risk)".to_string()
            }
            RiskReward::ZeroReward => "0 (limited reward, limited risk)".to_string(),
            RiskReward::Flat => "flat".to_string(),
            RiskReward::AllProfit => "all profit (no risk)".to_string(),
            RiskReward::AllLoss => "all loss (no reward)".to_string(),
            RiskReward::NotApplicable => "n/a".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrategyStats {
    pub max_profit: Bound,
    pub max_loss: Bound,
    /// Ascending, unique to 2 decimals
    pub breakevens: Vec<f64>,
    pub risk_reward: RiskReward,
}
