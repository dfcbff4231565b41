// ── Runtime configuration ──
//
// Already-validated values handed in by the binary. Core never reads
// config files; `dns-switcher-config` builds these from TOML and env.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use dns_switcher_api::{TlsMode, TransportConfig};

/// Comment written to every lease this tool owns.
pub const DEFAULT_MANAGED_COMMENT: &str = "DNS-Switcher-Managed";

/// What "custom DNS" means for this deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsPolicy {
    /// DNS server handed to clients in `CUSTOM` mode.
    pub custom_dns: Ipv4Addr,
    /// Ownership marker. A static lease is ours iff its comment equals this.
    pub managed_comment: String,
}

impl DnsPolicy {
    pub fn new(custom_dns: Ipv4Addr) -> Self {
        Self {
            custom_dns,
            managed_comment: DEFAULT_MANAGED_COMMENT.to_owned(),
        }
    }

    pub fn with_managed_comment(mut self, comment: impl Into<String>) -> Self {
        self.managed_comment = comment.into();
        self
    }
}

/// TLS verification strategy for the router's HTTPS endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. RouterOS ships a self-signed certificate.
    #[default]
    DangerAcceptInvalid,
}

/// How to reach the router's REST API.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Router root URL (e.g., `https://192.168.88.1`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request transport timeout.
    pub timeout: Duration,
}

impl RouterConfig {
    /// Transport settings for `dns_switcher_api::RouterOsClient`.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
