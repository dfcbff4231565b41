// ── DNS option provisioner ──
//
// Get-or-create of the single router-global DHCP option that carries the
// custom DNS server. The option is shared by every managed lease.

use std::net::Ipv4Addr;

use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{DhcpOption, NewDhcpOption};
use crate::store::{LeaseStore, StoreError};

/// Fixed name the option is looked up and created under.
pub const CUSTOM_DNS_OPTION_NAME: &str = "Custom DNS Server";

/// DHCP option 6: domain name servers.
pub const DNS_SERVERS_OPTION_CODE: u8 = 6;

/// Encode an IPv4 address as a RouterOS hex option value (`1.1.1.1` → `0x01010101`).
pub fn encode_dns_option_value(addr: Ipv4Addr) -> String {
    let [a, b, c, d] = addr.octets();
    format!("0x{a:02x}{b:02x}{c:02x}{d:02x}")
}

/// Return the custom DNS option, creating it on first use.
///
/// An existing option is returned as-is even when its value no longer
/// matches `custom_dns`.
pub async fn ensure_custom_dns_option<S: LeaseStore>(
    store: &S,
    custom_dns: Ipv4Addr,
    managed_comment: &str,
) -> Result<DhcpOption, CoreError> {
    let value = encode_dns_option_value(custom_dns);

    let existing = store
        .option_by_name(CUSTOM_DNS_OPTION_NAME)
        .await
        .map_err(|e| CoreError::from_store("DHCP option lookup", e))?;

    if let Some(option) = existing {
        if option.value == value {
            debug!(option = %option.id, "reusing custom DNS option");
        } else {
            warn!(
                option = %option.id,
                current = %option.value,
                expected = %value,
                "custom DNS option has a stale value; leaving it unchanged"
            );
        }
        return Ok(option);
    }

    let created = store
        .create_option(NewDhcpOption {
            name: CUSTOM_DNS_OPTION_NAME.to_owned(),
            code: DNS_SERVERS_OPTION_CODE,
            value,
            comment: managed_comment.to_owned(),
        })
        .await
        .map_err(|e| match e {
            StoreError::Rejected(reason) => CoreError::OptionCreationFailed {
                name: CUSTOM_DNS_OPTION_NAME.to_owned(),
                reason,
            },
            other => CoreError::from_store("DHCP option creation", other),
        })?;

    info!(option = %created.id, value = %created.value, "created custom DNS option");
    Ok(created)
}
