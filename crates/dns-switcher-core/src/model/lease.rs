// ── DHCP records ──

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::ids::{MacAddress, RecordId};

/// A DHCP lease held by the router for one IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    pub id: RecordId,
    pub address: Ipv4Addr,
    /// `None` for leases bound by client-id only.
    pub mac_address: Option<MacAddress>,
    /// Router-issued (`true`) or statically pinned (`false`).
    pub dynamic: bool,
    /// Ownership marker. See [`Lease::is_managed_by`].
    pub comment: Option<String>,
    /// Name of the DHCP option attached to this lease.
    pub dhcp_option: Option<String>,
}

impl Lease {
    /// Whether the lease carries exactly the given ownership marker.
    pub fn is_managed_by(&self, managed_comment: &str) -> bool {
        self.comment.as_deref() == Some(managed_comment)
    }
}

/// Request to create a static lease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLease {
    pub address: Ipv4Addr,
    pub mac_address: MacAddress,
    pub comment: String,
    pub dhcp_option: String,
}

/// Resolved IP→MAC mapping from the router's ARP table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArpEntry {
    pub address: Ipv4Addr,
    pub mac_address: MacAddress,
    pub interface: Option<String>,
}

/// Router-global DHCP option record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpOption {
    pub id: RecordId,
    pub name: String,
    pub code: u8,
    /// Raw RouterOS value expression, e.g. `0x01010101`.
    pub value: String,
    pub comment: Option<String>,
}

/// Request to create a DHCP option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDhcpOption {
    pub name: String,
    pub code: u8,
    pub value: String,
    pub comment: String,
}
