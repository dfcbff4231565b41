//! HTTP API: `/api/dns` plus service info, health, and the optional static UI.

pub mod client_ip;
pub mod envelope;
pub mod routes;
pub mod state;


use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum::http::HeaderName;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use dns_switcher_config::ServerSettings;
use dns_switcher_core::{StoreConnector, Switcher};

use crate::error::CliError;

pub use state::AppState;

/// Build the complete router.
///
/// With a `static_dir`, non-API requests are served from it and any path
/// that doesn't match a file falls back to `index.html`.
pub fn build_router<C: StoreConnector + 'static>(
    state: AppState<C>,
    static_dir: Option<&Path>,
) -> Router {
    let router = routes::router().with_state(state);

    let router = match static_dir {
        Some(dir) => {
            let spa_fallback = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
            router.fallback_service(spa_fallback)
        }
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C / SIGTERM.
pub async fn serve<C: StoreConnector + 'static>(
    switcher: Switcher<C>,
    settings: &ServerSettings,
) -> Result<(), CliError> {
    let header = settings
        .client_ip_header
        .as_deref()
        .map(HeaderName::try_from)
        .transpose()
        .map_err(|e| CliError::Validation {
            field: "server.client_ip_header".into(),
            reason: e.to_string(),
        })?;

    let state = AppState::new(switcher, header);
    let app = build_router(state, settings.static_dir.as_deref());

    let listener = TcpListener::bind(settings.listen)
        .await
        .map_err(|source| CliError::Bind {
            addr: settings.listen.to_string(),
            source,
        })?;
    info!(addr = %settings.listen, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
