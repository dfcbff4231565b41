//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use std::net::Ipv4Addr;

use miette::Diagnostic;
use thiserror::Error;

use dns_switcher_config::ConfigError;
use dns_switcher_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Engine outcomes ──────────────────────────────────────────────
    #[error("No hardware address known for {ip}")]
    #[diagnostic(
        code(dns_switcher::no_identity),
        help(
            "The router has neither a DHCP lease nor an ARP entry for {ip}.\n\
             Make sure the client is online (e.g. ping it) and try again."
        )
    )]
    NoIdentity { ip: Ipv4Addr },

    #[error("The lease for {ip} is not managed by dns-switcher")]
    #[diagnostic(
        code(dns_switcher::foreign_lease),
        help(
            "Lease comment: '{comment}'\n\
             Leases created by hand are never modified. Edit or remove it on the router."
        )
    )]
    ForeignLease { ip: Ipv4Addr, comment: String },

    // ── Router ───────────────────────────────────────────────────────
    #[error("Router unavailable: {reason}")]
    #[diagnostic(
        code(dns_switcher::router_unavailable),
        help(
            "Check router.url and the API credentials, and that the www-ssl (or www)\n\
             service is enabled. Use --insecure (-k) for self-signed certificates."
        )
    )]
    RouterUnavailable { reason: String },

    #[error("Router rejected {operation}: {reason}")]
    #[diagnostic(code(dns_switcher::router_rejected))]
    RouterRejected { operation: String, reason: String },

    #[error("Could not create DHCP option {name:?}: {reason}")]
    #[diagnostic(
        code(dns_switcher::option_creation),
        help("The API user needs write access to /ip/dhcp-server/option.")
    )]
    OptionCreation { name: String, reason: String },

    #[error("Unexpected router response: {reason}")]
    #[diagnostic(code(dns_switcher::invalid_response))]
    InvalidResponse { reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(dns_switcher::validation),
        help("Set it in the config file or with DNS_SWITCHER_* environment variables.")
    )]
    Validation { field: String, reason: String },

    #[error("No router password configured")]
    #[diagnostic(
        code(dns_switcher::no_credentials),
        help(
            "Set router.password or router.password_env in the config file,\n\
             or export DNS_SWITCHER_ROUTER__PASSWORD."
        )
    )]
    NoCredentials,

    #[error(transparent)]
    #[diagnostic(code(dns_switcher::config))]
    Config(Box<figment::Error>),

    // ── Server ───────────────────────────────────────────────────────
    #[error("Could not listen on {addr}")]
    #[diagnostic(
        code(dns_switcher::bind),
        help("Is another process already listening on {addr}? Try --listen.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(dns_switcher::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RouterUnavailable { .. } | Self::Bind { .. } => exit_code::CONNECTION,
            Self::NoCredentials => exit_code::AUTH,
            Self::NoIdentity { .. } => exit_code::NOT_FOUND,
            Self::ForeignLease { .. } => exit_code::CONFLICT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoIdentityFound { ip } => Self::NoIdentity { ip },
            CoreError::ForeignLeaseConflict { ip, comment } => Self::ForeignLease { ip, comment },
            CoreError::StoreUnavailable { reason } => Self::RouterUnavailable { reason },
            CoreError::StoreRejected { operation, reason } => {
                Self::RouterRejected { operation, reason }
            }
            CoreError::OptionCreationFailed { name, reason } => {
                Self::OptionCreation { name, reason }
            }
            CoreError::InvalidStoreResponse { reason } => Self::InvalidResponse { reason },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials => Self::NoCredentials,
            ConfigError::Figment(err) => Self::Config(err),
        }
    }
}
