use std::net::{Ipv4Addr, SocketAddr};

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use dns_switcher_core::{DnsMode, StoreConnector};

use super::client_ip::resolve_client_ip;
use super::envelope::{ApiError, ApiResponse};
use super::state::AppState;

/// `data` payload of every `/api/dns` response.
#[derive(Debug, Serialize)]
pub struct DnsStatus {
    pub status: DnsMode,
    pub ip: Ipv4Addr,
}

pub fn router<C: StoreConnector + 'static>() -> Router<AppState<C>> {
    Router::new()
        .route("/api", get(info::<C>))
        .route("/api/health", get(health))
        .route(
            "/api/dns",
            get(get_dns::<C>).put(put_dns::<C>).delete(delete_dns::<C>),
        )
}

fn client_ip<C>(
    state: &AppState<C>,
    headers: &HeaderMap,
    peer: SocketAddr,
) -> Result<Ipv4Addr, ApiError> {
    let ip = resolve_client_ip(headers, peer, state.client_ip_header.as_ref())?;
    debug!(%ip, %peer, "resolved client address");
    Ok(ip)
}

async fn get_dns<C: StoreConnector>(
    State(state): State<AppState<C>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<ApiResponse<DnsStatus>, ApiError> {
    let ip = client_ip(&state, &headers, peer)?;
    let status = state.switcher.status(ip).await?;
    Ok(ApiResponse::ok(DnsStatus { status, ip }))
}

async fn put_dns<C: StoreConnector>(
    State(state): State<AppState<C>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<ApiResponse<DnsStatus>, ApiError> {
    let ip = client_ip(&state, &headers, peer)?;
    state.switcher.switch_to_custom(ip).await?;
    Ok(ApiResponse::ok(DnsStatus {
        status: DnsMode::Custom,
        ip,
    }))
}

async fn delete_dns<C: StoreConnector>(
    State(state): State<AppState<C>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<ApiResponse<DnsStatus>, ApiError> {
    let ip = client_ip(&state, &headers, peer)?;
    state.switcher.reset_to_default(ip).await?;
    Ok(ApiResponse::ok(DnsStatus {
        status: DnsMode::Default,
        ip,
    }))
}

async fn info<C: StoreConnector>(State(state): State<AppState<C>>) -> ApiResponse<Value> {
    let policy = state.switcher.policy();
    ApiResponse::ok(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "custom_dns": policy.custom_dns,
        "managed_comment": policy.managed_comment,
        "endpoints": {
            "GET /api/dns": "current DNS mode of the calling client",
            "PUT /api/dns": "switch the calling client to custom DNS",
            "DELETE /api/dns": "reset the calling client to default DNS",
            "GET /api/health": "liveness probe",
        },
    }))
}

async fn health() -> ApiResponse<Value> {
    ApiResponse::ok(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
