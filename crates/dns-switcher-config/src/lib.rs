//! Configuration for dns-switcher.
//!
//! A TOML file layered under `DNS_SWITCHER_*` environment variables, then
//! validated into the types `dns-switcher-core` consumes. The binary applies
//! its flag overrides to [`Config`] before calling [`Config::into_settings`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use dns_switcher_core::{DEFAULT_MANAGED_COMMENT, DnsPolicy, RouterConfig, TlsVerification};

/// Prefix for environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "DNS_SWITCHER_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no router password configured")]
    NoCredentials,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Raw configuration as read from file and environment.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub router: RouterSection,
    #[serde(default)]
    pub dns: DnsSection,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Trusted proxy header carrying the client IP. Empty disables it.
    #[serde(default = "default_client_ip_header")]
    pub client_ip_header: String,

    /// Directory with the static web UI.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            client_ip_header: default_client_ip_header(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RouterSection {
    /// Router base URL (e.g., "https://192.168.88.1").
    pub url: Option<String>,

    #[serde(default = "default_username", deserialize_with = "lenient::string")]
    pub username: String,

    /// Password (plaintext; prefer `password_env`).
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub password: Option<String>,

    /// Environment variable name containing the password.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub password_env: Option<String>,

    /// Accept the router's self-signed certificate (RouterOS `www-ssl` default).
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    /// Path to custom CA certificate. Used when `insecure` is false.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for RouterSection {
    fn default() -> Self {
        Self {
            url: None,
            username: default_username(),
            password: None,
            password_env: None,
            insecure: default_insecure(),
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DnsSection {
    /// IPv4 DNS server handed to clients in custom mode.
    pub custom_server: Option<String>,

    #[serde(default = "default_managed_comment", deserialize_with = "lenient::string")]
    pub managed_comment: String,
}

impl Default for DnsSection {
    fn default() -> Self {
        Self {
            custom_server: None,
            managed_comment: default_managed_comment(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_client_ip_header() -> String {
    "x-real-ip".into()
}
fn default_username() -> String {
    "admin".into()
}
fn default_insecure() -> bool {
    false
}
fn default_timeout() -> u64 {
    30
}
fn default_managed_comment() -> String {
    DEFAULT_MANAGED_COMMENT.into()
}

// ── Lenient string fields ───────────────────────────────────────────

/// Free-text fields that figment's `Env` provider may have parsed into a
/// number or boolean (e.g. `DNS_SWITCHER_ROUTER__PASSWORD=12345`).
mod lenient {
    use std::fmt;

    use serde::de::{self, Deserializer, Visitor};

    struct Text;

    impl Visitor<'_> for Text {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    struct OptText;

    impl<'de> Visitor<'de> for OptText {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an optional string, number, or boolean")
        }

        fn visit_none<E: de::Error>(self) -> Result<Option<String>, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Option<String>, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Option<String>, D::Error> {
            string(d).map(Some)
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        d.deserialize_any(Text)
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        d.deserialize_option(OptText)
    }
}

// ── Validated settings ──────────────────────────────────────────────

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub listen: SocketAddr,
    /// Lowercased header name, or `None` to always use the peer address.
    pub client_ip_header: Option<String>,
    pub static_dir: Option<PathBuf>,
}

/// Everything the binary needs, validated.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub router: RouterConfig,
    pub policy: DnsPolicy,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "dns-switcher").map_or_else(
        || PathBuf::from("dns-switcher.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

fn base_figment() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
}

/// Load defaults, then the TOML file (if present), then the environment.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let config = base_figment()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

/// Parse a TOML document over the defaults, without environment overrides.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    Ok(base_figment().merge(Toml::string(toml)).extract()?)
}

// ── Validation ──────────────────────────────────────────────────────

impl Config {
    /// Validate into [`Settings`], reading `router.password_env` from the
    /// process environment.
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        self.into_settings_with(|name| std::env::var(name).ok())
    }

    /// Validate into [`Settings`] with a custom environment lookup.
    pub fn into_settings_with(
        self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Settings, ConfigError> {
        let router = self.router.validate(env)?;
        let policy = self.dns.validate()?;
        let server = self.server.validate()?;
        Ok(Settings {
            server,
            router,
            policy,
        })
    }
}

impl ServerSection {
    fn validate(self) -> Result<ServerSettings, ConfigError> {
        let listen = self
            .listen
            .trim()
            .parse()
            .map_err(|_| {
                invalid(
                    "server.listen",
                    format!("not a socket address: {}", self.listen),
                )
            })?;

        let header = self.client_ip_header.trim().to_ascii_lowercase();
        let client_ip_header = if header.is_empty() {
            None
        } else if header
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            Some(header)
        } else {
            return Err(invalid(
                "server.client_ip_header",
                format!("not a valid header name: {}", self.client_ip_header),
            ));
        };

        Ok(ServerSettings {
            listen,
            client_ip_header,
            static_dir: self.static_dir,
        })
    }
}

impl DnsSection {
    fn validate(self) -> Result<DnsPolicy, ConfigError> {
        let raw = self
            .custom_server
            .ok_or_else(|| invalid("dns.custom_server", "not set"))?;
        let custom_dns: Ipv4Addr = match raw.trim().parse::<IpAddr>() {
            Ok(IpAddr::V4(addr)) => addr,
            Ok(IpAddr::V6(_)) => {
                return Err(invalid("dns.custom_server", format!("{raw} is not an IPv4 address")));
            }
            Err(_) => return Err(invalid("dns.custom_server", format!("not an IP address: {raw}"))),
        };

        let comment = self.managed_comment.trim();
        if comment.is_empty() {
            return Err(invalid("dns.managed_comment", "must not be empty"));
        }

        Ok(DnsPolicy::new(custom_dns).with_managed_comment(comment))
    }
}

impl RouterSection {
    fn validate(self, env: impl Fn(&str) -> Option<String>) -> Result<RouterConfig, ConfigError> {
        let raw = self.url.as_deref().ok_or_else(|| invalid("router.url", "not set"))?;
        let url = Url::parse(raw).map_err(|e| invalid("router.url", format!("{raw}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("router.url", format!("unsupported scheme: {}", url.scheme())));
        }

        if self.username.trim().is_empty() {
            return Err(invalid("router.username", "must not be empty"));
        }
        if self.timeout == 0 {
            return Err(invalid("router.timeout", "must be at least 1 second"));
        }

        let password = self.resolve_password(env)?;

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(path) = self.ca_cert {
            TlsVerification::CustomCa(path)
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(RouterConfig {
            url,
            username: self.username,
            password,
            tls,
            timeout: Duration::from_secs(self.timeout),
        })
    }

    /// `password_env` wins over a plaintext `password`.
    fn resolve_password(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<SecretString, ConfigError> {
        if let Some(value) = self.password_env.as_deref().and_then(&env) {
            return Ok(SecretString::from(value));
        }
        match &self.password {
            Some(pw) if !pw.is_empty() => Ok(SecretString::from(pw.clone())),
            _ => Err(ConfigError::NoCredentials),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    const FULL: &str = r#"
        [server]
        listen = "127.0.0.1:8080"
        client_ip_header = "X-Forwarded-For"
        static_dir = "public"

        [router]
        url = "https://192.168.88.1"
        username = "api"
        password = "hunter2"
        insecure = false
        ca_cert = "/etc/ssl/router.pem"
        timeout = 5

        [dns]
        custom_server = "1.1.1.1"
        managed_comment = "lab-dns"
    "#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn full_config_validates() {
        let settings = parse_config(FULL).unwrap().into_settings_with(no_env).unwrap();

        assert_eq!(settings.server.listen, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(settings.server.client_ip_header.as_deref(), Some("x-forwarded-for"));
        assert_eq!(settings.server.static_dir, Some(PathBuf::from("public")));
        assert_eq!(settings.router.url.as_str(), "https://192.168.88.1/");
        assert_eq!(settings.router.username, "api");
        assert_eq!(settings.router.password.expose_secret(), "hunter2");
        assert_eq!(
            settings.router.tls,
            TlsVerification::CustomCa("/etc/ssl/router.pem".into())
        );
        assert_eq!(settings.router.timeout, Duration::from_secs(5));
        assert_eq!(settings.policy.custom_dns, Ipv4Addr::new(1, 1, 1, 1));
        assert_eq!(settings.policy.managed_comment, "lab-dns");
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let config = parse_config(
            r#"
            [router]
            url = "https://10.0.0.1"
            password = "pw"
            [dns]
            custom_server = "8.8.4.4"
            "#,
        )
        .unwrap();
        let settings = config.into_settings_with(no_env).unwrap();

        assert_eq!(settings.server.listen, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(settings.server.client_ip_header.as_deref(), Some("x-real-ip"));
        assert_eq!(settings.router.username, "admin");
        assert_eq!(settings.router.tls, TlsVerification::SystemDefaults);
        assert_eq!(settings.router.timeout, Duration::from_secs(30));
        assert_eq!(settings.policy.managed_comment, "DNS-Switcher-Managed");
    }

    #[test]
    fn empty_header_disables_header_trust() {
        let mut config = parse_config(FULL).unwrap();
        config.server.client_ip_header = String::new();
        let settings = config.into_settings_with(no_env).unwrap();
        assert_eq!(settings.server.client_ip_header, None);
    }

    #[test]
    fn ipv6_custom_server_is_rejected() {
        let mut config = parse_config(FULL).unwrap();
        config.dns.custom_server = Some("2606:4700:4700::1111".into());
        let err = config.into_settings_with(no_env).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "dns.custom_server")
        );
    }

    #[test]
    fn blank_managed_comment_is_rejected() {
        let mut config = parse_config(FULL).unwrap();
        config.dns.managed_comment = "   ".into();
        let err = config.into_settings_with(no_env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation { ref field, .. } if field == "dns.managed_comment"
        ));
    }

    #[test]
    fn bad_router_url_is_rejected() {
        let mut config = parse_config(FULL).unwrap();
        config.router.url = Some("ftp://router".into());
        assert!(config.into_settings_with(no_env).is_err());

        let mut config = parse_config(FULL).unwrap();
        config.router.url = None;
        let err = config.into_settings_with(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "router.url"));
    }

    #[test]
    fn bad_listen_and_header_are_rejected() {
        let mut config = parse_config(FULL).unwrap();
        config.server.listen = "localhost".into();
        assert!(config.into_settings_with(no_env).is_err());

        let mut config = parse_config(FULL).unwrap();
        config.server.client_ip_header = "x real ip".into();
        assert!(config.into_settings_with(no_env).is_err());
    }

    #[test]
    fn password_env_wins_over_plaintext() {
        let mut config = parse_config(FULL).unwrap();
        config.router.password_env = Some("ROUTER_PASSWORD".into());
        let settings = config
            .into_settings_with(|name| (name == "ROUTER_PASSWORD").then(|| "from-env".to_string()))
            .unwrap();
        assert_eq!(settings.router.password.expose_secret(), "from-env");
    }

    #[test]
    fn missing_password_is_no_credentials() {
        let mut config = parse_config(FULL).unwrap();
        config.router.password = None;
        config.router.password_env = Some("UNSET_VARIABLE".into());
        let err = config.into_settings_with(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials));
    }

    #[test]
    fn malformed_toml_is_figment_error() {
        let err = parse_config("[router\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.router.username, "api");
        assert_eq!(config.dns.custom_server.as_deref(), Some("1.1.1.1"));
    }

    #[test]
    fn insecure_accepts_self_signed_certificates() {
        let mut config = parse_config(FULL).unwrap();
        config.router.insecure = true;
        let settings = config.into_settings_with(no_env).unwrap();
        assert_eq!(settings.router.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn numeric_env_values_stay_text() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [router]
                url = "https://192.168.88.1"
                [dns]
                custom_server = "1.1.1.1"
                "#,
            )?;
            jail.set_env("DNS_SWITCHER_ROUTER__PASSWORD", "12345");
            jail.set_env("DNS_SWITCHER_DNS__MANAGED_COMMENT", "2024");

            let config = load_config(Some(Path::new("config.toml"))).unwrap();
            assert_eq!(config.router.password.as_deref(), Some("12345"));
            assert_eq!(config.dns.managed_comment, "2024");

            let settings = config.into_settings_with(no_env).unwrap();
            assert_eq!(settings.router.password.expose_secret(), "12345");
            assert_eq!(settings.policy.managed_comment, "2024");
            Ok(())
        });
    }

    #[test]
    fn numeric_toml_values_stay_text() {
        let config = parse_config(
            r#"
            [router]
            username = 1000
            password = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.router.username, "1000");
        assert_eq!(config.router.password.as_deref(), Some("42"));
        assert_eq!(config.router.password_env, None);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:3000");
    }
}
