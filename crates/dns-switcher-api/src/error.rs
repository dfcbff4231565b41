use thiserror::Error;

/// Top-level error type for the `dns-switcher-api` crate.
///
/// Covers every failure mode of the RouterOS REST surface:
/// authentication, transport, router-side rejections, and decoding.
/// `dns-switcher-core` maps these into store-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Router rejected the Basic credentials (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── RouterOS ────────────────────────────────────────────────────
    /// Error body returned by the router:
    /// `{"error": 400, "message": "Bad Request", "detail": "..."}`.
    #[error("RouterOS error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the router could not be reached or refused the
    /// session, as opposed to rejecting an individual request.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Authentication { .. } | Self::Transport(_) | Self::Tls(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::InvalidUrl(_) | Self::Deserialization { .. } => false,
        }
    }

    /// The router's detail line if present, otherwise the summary message.
    pub fn router_message(&self) -> Option<&str> {
        match self {
            Self::Api {
                detail, message, ..
            } => Some(detail.as_deref().unwrap_or(message)),
            _ => None,
        }
    }
}
