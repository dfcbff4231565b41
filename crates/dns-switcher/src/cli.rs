//! Clap derive structures for the `dns-switcher` binary.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dns-switcher -- per-client DNS switching through RouterOS DHCP leases
#[derive(Debug, Parser)]
#[command(
    name = "dns-switcher",
    version,
    about = "Switch LAN clients between default and custom DNS via RouterOS DHCP leases",
    long_about = "Serves a small web API that lets each client on the LAN move itself\n\
        between the router's default DNS and an operator-chosen DNS server,\n\
        by managing static DHCP leases on a RouterOS v7 router.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file path
    #[arg(long, env = "DNS_SWITCHER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Router URL (overrides config)
    #[arg(long, short = 'r', global = true)]
    pub router: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Output format for one-shot commands
    #[arg(long, short = 'o', default_value = "plain", global = true)]
    pub output: OutputFormat,

    /// Log line format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One line per result
    Plain,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Text,
    /// JSON lines
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API (and static UI, if configured)
    Serve(ServeArgs),

    /// Show a client's DNS mode
    Status(TargetArgs),

    /// Switch a client to the custom DNS server
    #[command(alias = "switch")]
    Custom(TargetArgs),

    /// Return a client to the router's default DNS
    #[command(alias = "default")]
    Reset(TargetArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.listen)
    #[arg(long, short = 'l')]
    pub listen: Option<String>,
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Client IPv4 address
    pub ip: Ipv4Addr,
}
