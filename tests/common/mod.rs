#![allow(dead_code)]

use std::sync::Arc;

use rmcp::model::CallToolRequestParams;
use rmcp::service::{RoleClient, RunningService};
use rmcp::ServiceExt;

use payoff_mcp::config::PayoffConfig;
use payoff_mcp::engine::types::{Action, LegInput, LegKind, OptionType};
use payoff_mcp::server::PayoffServer;

pub type TestClient = RunningService<RoleClient, ()>;

pub fn make_test_server() -> PayoffServer {
    PayoffServer::new(Arc::new(PayoffConfig::default()))
}

/// Serve `server` over an in-memory duplex pair and connect a client to it.
pub async fn connect(server: PayoffServer) -> TestClient {
    let (server_tx, server_rx) = tokio::io::duplex(4096);
    let (client_tx, client_rx) = tokio::io::duplex(4096);

    // Server reads from client_rx, writes to server_tx
    // Client reads from server_rx, writes to client_tx
    tokio::spawn(async move {
        let service = server.serve((client_rx, server_tx)).await.unwrap();
        let _ = service.waiting().await;
    });

    ().serve((server_rx, client_tx)).await.unwrap()
}

/// Call a tool and return `(is_error, text)`.
pub async fn call_tool(
    client: &TestClient,
    name: &str,
    arguments: Option<serde_json::Value>,
) -> (bool, String) {
    let result = client
        .peer()
        .call_tool(CallToolRequestParams {
            meta: None,
            name: name.to_string().into(),
            arguments: arguments.map(|a| serde_json::from_value(a).unwrap()),
            task: None,
        })
        .await
        .unwrap();

    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default();
    (result.is_error.unwrap_or(false), text)
}

/// Call a tool that must succeed and parse its JSON body.
pub async fn call_json(
    client: &TestClient,
    name: &str,
    arguments: Option<serde_json::Value>,
) -> serde_json::Value {
    let (is_error, text) = call_tool(client, name, arguments).await;
    assert!(!is_error, "{name} failed: {text}");
    serde_json::from_str(&text).unwrap()
}

pub fn option_leg(
    action: Action,
    option_type: OptionType,
    strike: f64,
    premium: f64,
    quantity: i64,
) -> LegInput {
    LegInput {
        kind: Some(LegKind::Option),
        action: Some(action),
        quantity: Some((quantity as f64).into()),
        option_type: Some(option_type),
        strike: Some(strike.into()),
        premium: Some(premium.into()),
        entry_price: None,
    }
}

pub fn future_leg(action: Action, entry_price: f64, quantity: i64) -> LegInput {
    LegInput {
        kind: Some(LegKind::Future),
        action: Some(action),
        quantity: Some((quantity as f64).into()),
        entry_price: Some(entry_price.into()),
        ..LegInput::default()
    }
}

pub fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
