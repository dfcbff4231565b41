//! One-shot operator commands: `status`, `custom`, `reset`.

use std::net::Ipv4Addr;

use serde::Serialize;
use tracing::debug;

use dns_switcher_core::{DnsMode, Lease, StoreConnector, Switcher};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

/// Result of a one-shot command.
#[derive(Debug, Serialize)]
pub struct Report {
    pub ip: Ipv4Addr,
    pub status: DnsMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease: Option<Lease>,
}

fn plain(report: &Report) -> String {
    match &report.lease {
        Some(lease) => {
            let mac = lease
                .mac_address
                .as_ref()
                .map_or_else(|| "-".to_owned(), ToString::to_string);
            format!("{}\t{}\tlease {} mac {mac}", report.ip, report.status, lease.id)
        }
        None => format!("{}\t{}", report.ip, report.status),
    }
}

fn emit(report: &Report, format: OutputFormat) -> Result<(), CliError> {
    let rendered = output::render_single(format, report, plain)?;
    output::print_output(&rendered)
}

pub async fn status<C: StoreConnector>(
    switcher: &Switcher<C>,
    ip: Ipv4Addr,
    format: OutputFormat,
) -> Result<(), CliError> {
    debug!(%ip, "status");
    let status = switcher.status(ip).await?;
    emit(
        &Report {
            ip,
            status,
            lease: None,
        },
        format,
    )
}

pub async fn custom<C: StoreConnector>(
    switcher: &Switcher<C>,
    ip: Ipv4Addr,
    format: OutputFormat,
) -> Result<(), CliError> {
    debug!(%ip, "switch to custom");
    let lease = switcher.switch_to_custom(ip).await?;
    emit(
        &Report {
            ip,
            status: DnsMode::Custom,
            lease: Some(lease),
        },
        format,
    )
}

pub async fn reset<C: StoreConnector>(
    switcher: &Switcher<C>,
    ip: Ipv4Addr,
    format: OutputFormat,
) -> Result<(), CliError> {
    debug!(%ip, "reset to default");
    switcher.reset_to_default(ip).await?;
    emit(
        &Report {
            ip,
            status: DnsMode::Default,
            lease: None,
        },
        format,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dns_switcher_core::{MacAddress, RecordId};

    use super::*;

    #[test]
    fn plain_line_includes_lease_details() {
        let report = Report {
            ip: Ipv4Addr::new(10, 0, 0, 5),
            status: DnsMode::Custom,
            lease: Some(Lease {
                id: RecordId::from("*1A"),
                address: Ipv4Addr::new(10, 0, 0, 5),
                mac_address: Some(MacAddress::new("aa:bb:cc:dd:ee:ff")),
                dynamic: false,
                comment: Some("DNS-Switcher-Managed".into()),
                dhcp_option: Some("Custom DNS Server".into()),
            }),
        };
        assert_eq!(
            plain(&report),
            "10.0.0.5\tCUSTOM\tlease *1A mac aa:bb:cc:dd:ee:ff"
        );
    }

    #[test]
    fn json_omits_missing_lease() {
        let report = Report {
            ip: Ipv4Addr::new(10, 0, 0, 6),
            status: DnsMode::Default,
            lease: None,
        };
        let rendered = output::render_single(OutputFormat::Json, &report, plain).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, serde_json::json!({ "ip": "10.0.0.6", "status": "DEFAULT" }));
    }
}
