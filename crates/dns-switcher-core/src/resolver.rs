// ── Status resolver ──

use crate::model::{DnsMode, Lease};

/// Derive a client's DNS mode from its lease. First match wins:
///
/// 1. no lease → `DEFAULT`
/// 2. dynamic lease → `DEFAULT`
/// 3. static lease whose comment is not `managed_comment` → `UNMANAGED`
/// 4. otherwise → `CUSTOM`
pub fn resolve(lease: Option<&Lease>, managed_comment: &str) -> DnsMode {
    match lease {
        None => DnsMode::Default,
        Some(lease) if lease.dynamic => DnsMode::Default,
        Some(lease) if !lease.is_managed_by(managed_comment) => DnsMode::Unmanaged,
        Some(_) => DnsMode::Custom,
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::model::{MacAddress, RecordId};

    const MANAGED: &str = "DNS-Switcher-Managed";

    fn lease(dynamic: bool, comment: Option<&str>) -> Lease {
        Lease {
            id: RecordId::from("*1"),
            address: Ipv4Addr::new(10, 0, 0, 5),
            mac_address: Some(MacAddress::new("aa:bb:cc:dd:ee:ff")),
            dynamic,
            comment: comment.map(str::to_owned),
            dhcp_option: None,
        }
    }

    #[test]
    fn no_lease_is_default() {
        assert_eq!(resolve(None, MANAGED), DnsMode::Default);
    }

    #[test]
    fn dynamic_lease_is_default_whatever_the_comment() {
        assert_eq!(resolve(Some(&lease(true, None)), MANAGED), DnsMode::Default);
        assert_eq!(
            resolve(Some(&lease(true, Some("manual-entry"))), MANAGED),
            DnsMode::Default
        );
    }

    #[test]
    fn static_foreign_lease_is_unmanaged() {
        assert_eq!(
            resolve(Some(&lease(false, Some("manual-entry"))), MANAGED),
            DnsMode::Unmanaged
        );
        assert_eq!(resolve(Some(&lease(false, None)), MANAGED), DnsMode::Unmanaged);
    }

    #[test]
    fn static_managed_lease_is_custom() {
        assert_eq!(
            resolve(Some(&lease(false, Some(MANAGED))), MANAGED),
            DnsMode::Custom
        );
    }

    #[test]
    fn comment_match_is_exact() {
        assert_eq!(
            resolve(Some(&lease(false, Some("dns-switcher-managed"))), MANAGED),
            DnsMode::Unmanaged
        );
    }
}
