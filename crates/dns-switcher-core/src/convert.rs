// ── Wire-to-domain conversions ──
//
// Bridges raw `dns_switcher_api` records into canonical `model` types.
// RouterOS reports unset fields as empty strings, which become `None`.
// Anything that cannot be parsed is a `StoreError::Malformed`.

use std::net::Ipv4Addr;

use dns_switcher_api::{RosArpEntry, RosDhcpOption, RosLease};

use crate::model::{ArpEntry, DhcpOption, Lease, MacAddress, RecordId};
use crate::store::StoreError;

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

fn parse_ipv4(raw: &str, kind: &str) -> Result<Ipv4Addr, StoreError> {
    raw.trim()
        .parse()
        .map_err(|_| StoreError::Malformed(format!("{kind} has invalid IPv4 address {raw:?}")))
}

impl TryFrom<RosLease> for Lease {
    type Error = StoreError;

    fn try_from(raw: RosLease) -> Result<Self, Self::Error> {
        Ok(Self {
            address: parse_ipv4(&raw.address, "lease")?,
            id: RecordId::new(raw.id),
            mac_address: non_empty(raw.mac_address).map(MacAddress::new),
            dynamic: raw.dynamic,
            comment: non_empty(raw.comment),
            dhcp_option: non_empty(raw.dhcp_option),
        })
    }
}

impl TryFrom<RosDhcpOption> for DhcpOption {
    type Error = StoreError;

    fn try_from(raw: RosDhcpOption) -> Result<Self, Self::Error> {
        let code = raw.code.trim().parse().map_err(|_| {
            StoreError::Malformed(format!(
                "DHCP option {:?} has invalid code {:?}",
                raw.name, raw.code
            ))
        })?;
        Ok(Self {
            id: RecordId::new(raw.id),
            name: raw.name,
            code,
            value: raw.value.unwrap_or_default(),
            comment: non_empty(raw.comment),
        })
    }
}

/// Convert an ARP row, yielding `None` for incomplete entries.
pub fn arp_entry(raw: RosArpEntry) -> Result<Option<ArpEntry>, StoreError> {
    let Some(mac) = non_empty(raw.mac_address) else {
        return Ok(None);
    };
    Ok(Some(ArpEntry {
        address: parse_ipv4(&raw.address, "ARP entry")?,
        mac_address: MacAddress::new(mac),
        interface: non_empty(raw.interface),
    }))
}
