mod cli;
mod commands;
mod error;
mod output;
mod server;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dns_switcher_config::Settings;
use dns_switcher_core::{RouterOsConnector, Switcher};

use crate::cli::{Cli, Command, LogFormat, ServeArgs};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The server logs its lifecycle at info by default.
    let base = u8::from(matches!(cli.command, Command::Serve(_)));
    init_tracing(base.saturating_add(cli.global.verbose), cli.global.log_format);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, format: LogFormat) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.with_target(false).init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Settings {
        server,
        router,
        policy,
    } = load_settings(&cli)?;

    tracing::debug!(router = %router.url, custom_dns = %policy.custom_dns, "configuration loaded");
    let switcher = Switcher::new(RouterOsConnector::new(router), policy);
    let format = cli.global.output;

    match cli.command {
        Command::Serve(_) => server::serve(switcher, &server).await,
        Command::Status(args) => commands::status(&switcher, args.ip, format).await,
        Command::Custom(args) => commands::custom(&switcher, args.ip, format).await,
        Command::Reset(args) => commands::reset(&switcher, args.ip, format).await,
    }
}

/// Load file + env configuration, then apply CLI flag overrides.
fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    let mut config = dns_switcher_config::load_config(cli.global.config.as_deref())?;

    if let Some(url) = &cli.global.router {
        config.router.url = Some(url.clone());
    }
    if cli.global.insecure {
        config.router.insecure = true;
    }
    if let Command::Serve(ServeArgs {
        listen: Some(listen),
    }) = &cli.command
    {
        config.server.listen.clone_from(listen);
    }

    Ok(config.into_settings()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use dns_switcher_core::TlsVerification;

    use super::*;

    fn config_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
            [router]
            url = "https://192.168.88.1"
            password = "hunter2"
            [dns]
            custom_server = "1.1.1.1"
            "#,
        )
        .unwrap();
        file
    }

    fn settings(extra: &[&str]) -> Settings {
        let file = config_file();
        let path = file.path().to_str().unwrap();
        let mut args = vec!["dns-switcher", "--config", path];
        args.extend_from_slice(extra);
        args.extend(["status", "10.0.0.5"]);
        load_settings(&Cli::parse_from(args)).unwrap()
    }

    #[test]
    fn router_tls_is_strict_by_default() {
        assert_eq!(settings(&[]).router.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn insecure_flag_accepts_self_signed_certificates() {
        assert_eq!(
            settings(&["-k"]).router.tls,
            TlsVerification::DangerAcceptInvalid
        );
    }
}
