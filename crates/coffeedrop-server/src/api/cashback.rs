//! Cashback calculation handler.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::header::USER_AGENT,
    http::HeaderMap,
    Extension, Json,
};

use coffeedrop_core::cashback::{calculate_cashback as calculate, format_pounds};

use crate::middleware::RequestId;

use super::AppState;

/// POST /CalculateCashback — compute the tiered reward for an order.
///
/// Every call is audited, including zero totals. An audit insert failure is
/// logged and never blocks the response; the client still gets the computed
/// amount.
pub(super) async fn calculate_cashback(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Json<String> {
    let pence = calculate(&payload);

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if let Err(e) = coffeedrop_db::insert_cashback_request(
        &state.pool,
        &addr.ip().to_string(),
        user_agent,
        &payload,
        pence,
    )
    .await
    {
        tracing::error!(request_id = %req_id.0, error = %e, "failed to persist cashback audit record");
    }

    tracing::debug!(request_id = %req_id.0, pence, "cashback calculated");
    Json(format_pounds(pence))
}
