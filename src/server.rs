use garde::Validate;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Json},
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::PayoffConfig;
use crate::engine::analysis::LivePosition;
use crate::engine::domain::MAX_DOMAIN_POINTS;
use crate::engine::types::LegInput;
use crate::tools;
use crate::tools::calculate::LegSource;
use crate::tools::response_types::{
    BuildStrategyResponse, EvaluatePriceResponse, PayoffResponse, PreviewResponse,
    StrategiesResponse,
};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn validate_positive(value: &f64, (): &()) -> garde::Result {
    if value.is_finite() && *value > 0.0 {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "must be a positive number, got {value}"
        )))
    }
}

#[derive(Clone)]
pub struct PayoffServer {
    pub config: Arc<PayoffConfig>,
    /// Leg set of the last `calculate_payoff` call in this session.
    pub position: Arc<RwLock<Option<LivePosition>>>,
    tool_router: ToolRouter<Self>,
}

impl PayoffServer {
    pub fn new(config: Arc<PayoffConfig>) -> Self {
        Self {
            config,
            position: Arc::new(RwLock::new(None)),
            tool_router: Self::tool_router(),
        }
    }
}

/// Streamable HTTP router: MCP under `/mcp`, liveness under `/health`.
/// Each MCP session gets its own server and therefore its own position.
pub fn http_router(config: Arc<PayoffConfig>) -> axum::Router {
    use rmcp::transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    };
    use tower_http::cors::CorsLayer;

    let service = StreamableHttpService::new(
        move || Ok(PayoffServer::new(config.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    axum::Router::new()
        .nest_service("/mcp", service)
        .route("/health", axum::routing::get(|| async { "ok" }))
        .layer(CorsLayer::permissive())
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct BuildStrategyParams {
    /// Strategy name from `list_strategies` (e.g. '`iron_condor`')
    #[garde(length(min = 1))]
    pub strategy: String,
    /// Current underlying price
    #[garde(custom(validate_positive))]
    pub underlying_price: f64,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct CalculatePayoffParams {
    /// Current underlying price
    #[garde(custom(validate_positive))]
    pub underlying_price: f64,
    /// Days to expiration; enables expected-move levels
    #[garde(inner(custom(validate_positive)))]
    pub days_to_expiration: Option<f64>,
    /// Absolute legs (option: `option_type`, strike, premium; future: `entry_price`).
    /// Mutually exclusive with `strategy`. Checked per leg by the engine.
    #[garde(skip)]
    pub legs: Option<Vec<LegInput>>,
    /// Catalog strategy to resolve at `underlying_price` instead of `legs`
    #[garde(inner(length(min = 1)))]
    pub strategy: Option<String>,
    /// Number of chart intervals (default from configuration, usually 200)
    #[garde(inner(range(min = 2, max = MAX_DOMAIN_POINTS)))]
    pub samples: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct EvaluatePriceParams {
    /// Expiration price to evaluate the current legs at
    #[garde(range(min = 0.0))]
    pub price: f64,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct PreviewStrategiesParams {
    /// Current underlying price
    #[garde(custom(validate_positive))]
    pub underlying_price: f64,
}

use rmcp::handler::server::wrapper::Parameters;

#[tool_router]
impl PayoffServer {
    /// Browse the built-in strategy catalog.
    ///
    /// **When to use**: To pick a named strategy before building or charting it
    /// **Prerequisites**: None
    /// **Next tools**: build_strategy() or calculate_payoff({ strategy })
    ///
    /// Returns each strategy's category, leg count, pricing mode (simple 5% offsets or
    /// advanced 2% intervals) and its relative leg templates, in catalog order.
    #[tool(name = "list_strategies")]
    async fn list_strategies(&self) -> Json<StrategiesResponse> {
        Json(tools::strategies::execute())
    }

    /// Resolve a catalog strategy into absolute legs at a given underlying price.
    ///
    /// **When to use**: To get editable legs (strikes, premiums, entry prices)
    /// **Prerequisites**: None
    /// **Next tool**: calculate_payoff({ legs }) with the returned (possibly edited) legs
    ///
    /// Strikes round to the configured unit (default 100). Premiums are rough
    /// heuristics, not model prices. Futures always enter at the money.
    #[tool(name = "build_strategy")]
    async fn build_strategy(
        &self,
        Parameters(params): Parameters<BuildStrategyParams>,
    ) -> Result<Json<BuildStrategyResponse>, String> {
        params
            .validate()
            .map_err(|e| format!("Validation error: {e}"))?;
        tools::build::execute(&self.config, &params.strategy, params.underlying_price)
            .map(Json)
            .map_err(|e| format!("Error: {e}"))
    }

    /// Compute the expiration payoff curve and risk statistics of a position.
    ///
    /// **When to use**: To chart a strategy and read max profit/loss, breakevens, risk/reward
    /// **Prerequisites**: None
    /// **Input**: `underlying_price` plus either `legs` or `strategy`
    /// **Next tool**: evaluate_price() to read the P&L of these legs at any price
    ///
    /// **Output**:
    ///   - Price domain (±20% around the underlying, widened 10% beyond the strikes)
    ///   - Sampled curve of (price, pnl) points
    ///   - Max profit / max loss (a number, or Unlimited when structurally unbounded)
    ///   - Breakevens, risk/reward classification, P&L at the current price
    ///   - ±1σ/±2σ expected-move levels when `days_to_expiration` is given
    ///
    /// Invalid legs are reported all at once with their 1-based leg number and field.
    #[tool(name = "calculate_payoff")]
    async fn calculate_payoff(
        &self,
        Parameters(params): Parameters<CalculatePayoffParams>,
    ) -> Result<Json<PayoffResponse>, String> {
        params
            .validate()
            .map_err(|e| format!("Validation error: {e}"))?;
        let source = LegSource::from_parts(params.legs.as_deref(), params.strategy.as_deref())
            .map_err(|e| format!("Validation error: {e}"))?;

        let (response, position) = tools::calculate::execute(
            &self.config,
            params.underlying_price,
            params.days_to_expiration,
            source,
            params.samples,
        )
        .map_err(|e| format!("Error: {e}"))?;

        *self.position.write().await = Some(position);
        Ok(Json(response))
    }

    /// P&L of the most recently calculated legs at a single expiration price.
    ///
    /// **When to use**: Interactive price exploration (slider) after calculate_payoff
    /// **Prerequisites**: calculate_payoff() must have been called in this session
    ///
    /// Reuses the stored legs without re-resolving anything; any non-negative
    /// price is accepted, including prices outside the charted range.
    #[tool(name = "evaluate_price")]
    async fn evaluate_price(
        &self,
        Parameters(params): Parameters<EvaluatePriceParams>,
    ) -> Result<Json<EvaluatePriceResponse>, String> {
        params
            .validate()
            .map_err(|e| format!("Validation error: {e}"))?;
        let position = self.position.read().await;
        tools::evaluate::execute(position.as_ref(), params.price)
            .map(Json)
            .map_err(|e| format!("Error: {e}"))
    }

    /// Mini payoff curves for every catalog strategy.
    ///
    /// **When to use**: To compare the shapes of all strategies at a glance
    /// **Prerequisites**: None
    /// **Next tools**: build_strategy() or calculate_payoff({ strategy })
    ///
    /// Each curve spans ±10% around the underlying in 50 steps.
    #[tool(name = "preview_strategies")]
    async fn preview_strategies(
        &self,
        Parameters(params): Parameters<PreviewStrategiesParams>,
    ) -> Result<Json<PreviewResponse>, String> {
        params
            .validate()
            .map_err(|e| format!("Validation error: {e}"))?;
        tools::preview::execute(&self.config, params.underlying_price)
            .map(Json)
            .map_err(|e| format!("Error: {e}"))
    }
}

#[tool_handler]
impl ServerHandler for PayoffServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: rmcp::model::ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "payoff-mcp".into(),
                title: None,
                version: "0.1.0".into(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Options and futures strategy payoff engine. P&L is computed at expiration; \
                premiums of catalog strategies are rough heuristics, not model prices.\
                \n\nRecommended workflow:\
                \n1. list_strategies() — browse the catalog (singles, spreads, volatility, \
                synthetics, butterflies, condors, iron).\
                \n2. build_strategy({ strategy, underlying_price }) — resolve a strategy into \
                absolute legs that can be edited.\
                \n3. calculate_payoff({ underlying_price, days_to_expiration?, legs | strategy, \
                samples? }) — payoff curve, max profit/loss (Unlimited when structurally \
                unbounded), breakevens, risk/reward and expected-move levels.\
                \n4. evaluate_price({ price }) — P&L of the last calculated legs at any price.\
                \n5. preview_strategies({ underlying_price }) — mini curves for the whole catalog.\
                \n\nLegs: { kind: option, action: buy|sell, quantity, option_type: call|put, \
                strike, premium } or { kind: future, action, quantity, entry_price }."
                    .into(),
            ),
        }
    }
}
