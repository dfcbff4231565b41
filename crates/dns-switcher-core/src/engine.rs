// ── Mode transition engine ──
//
// Plan/execute pipeline. `plan_switch` and `plan_reset` look at the
// current lease and decide; the executors then perform exactly the store
// calls the plan names. Planning never touches the store.

use std::net::Ipv4Addr;

use tracing::{debug, info};

use crate::config::DnsPolicy;
use crate::error::CoreError;
use crate::model::{DnsMode, Lease, MacAddress, NewLease, RecordId};
use crate::provisioner::ensure_custom_dns_option;
use crate::resolver::resolve;
use crate::store::LeaseStore;

/// What `switch_to_custom` will do for a given lease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchPlan {
    /// Static lease already ours; return it unchanged.
    AlreadyCustom(Lease),
    /// Static lease owned by someone else.
    Conflict { comment: Option<String> },
    /// Create a managed static lease, replacing the dynamic one if present.
    Provision { replaces: Option<Lease> },
}

/// What `reset_to_default` will do for a given lease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetPlan {
    NoLease,
    Conflict { comment: Option<String> },
    Delete(RecordId),
}

pub fn plan_switch(lease: Option<Lease>, managed_comment: &str) -> SwitchPlan {
    match lease {
        None => SwitchPlan::Provision { replaces: None },
        Some(lease) if lease.dynamic => SwitchPlan::Provision {
            replaces: Some(lease),
        },
        Some(lease) if lease.is_managed_by(managed_comment) => SwitchPlan::AlreadyCustom(lease),
        Some(lease) => SwitchPlan::Conflict {
            comment: lease.comment,
        },
    }
}

/// Dynamic leases are not ours either, so they conflict unless they
/// happen to carry the managed comment.
pub fn plan_reset(lease: Option<Lease>, managed_comment: &str) -> ResetPlan {
    match lease {
        None => ResetPlan::NoLease,
        Some(lease) if lease.is_managed_by(managed_comment) => ResetPlan::Delete(lease.id),
        Some(lease) => ResetPlan::Conflict {
            comment: lease.comment,
        },
    }
}

// ── Executors ───────────────────────────────────────────────────────

async fn fetch_lease<S: LeaseStore>(store: &S, ip: Ipv4Addr) -> Result<Option<Lease>, CoreError> {
    let lease = store
        .lease_by_address(ip)
        .await
        .map_err(|e| CoreError::from_store("lease lookup", e))?;
    debug!(%ip, found = lease.is_some(), "fetched lease");
    Ok(lease)
}

/// Current DNS mode of `ip`.
pub async fn current_mode<S: LeaseStore>(
    store: &S,
    policy: &DnsPolicy,
    ip: Ipv4Addr,
) -> Result<DnsMode, CoreError> {
    let lease = fetch_lease(store, ip).await?;
    Ok(resolve(lease.as_ref(), &policy.managed_comment))
}

/// Move `ip` into `CUSTOM` and return its managed static lease.
pub async fn switch_to_custom<S: LeaseStore>(
    store: &S,
    policy: &DnsPolicy,
    ip: Ipv4Addr,
) -> Result<Lease, CoreError> {
    let lease = fetch_lease(store, ip).await?;

    match plan_switch(lease, &policy.managed_comment) {
        SwitchPlan::AlreadyCustom(lease) => {
            debug!(%ip, lease = %lease.id, "already on custom DNS");
            Ok(lease)
        }
        SwitchPlan::Conflict { comment } => Err(CoreError::ForeignLeaseConflict {
            ip,
            comment: comment.unwrap_or_default(),
        }),
        SwitchPlan::Provision { replaces } => provision(store, policy, ip, replaces).await,
    }
}

/// Return `ip` to `DEFAULT` by deleting its managed lease.
pub async fn reset_to_default<S: LeaseStore>(
    store: &S,
    policy: &DnsPolicy,
    ip: Ipv4Addr,
) -> Result<(), CoreError> {
    let lease = fetch_lease(store, ip).await?;

    match plan_reset(lease, &policy.managed_comment) {
        ResetPlan::NoLease => {
            debug!(%ip, "no lease; already on default DNS");
            Ok(())
        }
        ResetPlan::Conflict { comment } => Err(CoreError::ForeignLeaseConflict {
            ip,
            comment: comment.unwrap_or_default(),
        }),
        ResetPlan::Delete(id) => {
            store
                .delete_lease(&id)
                .await
                .map_err(|e| CoreError::from_store("lease deletion", e))?;
            info!(%ip, lease = %id, "reset to default DNS");
            Ok(())
        }
    }
}

async fn provision<S: LeaseStore>(
    store: &S,
    policy: &DnsPolicy,
    ip: Ipv4Addr,
    replaces: Option<Lease>,
) -> Result<Lease, CoreError> {
    let mac = identify(store, ip, replaces.as_ref()).await?;
    let option = ensure_custom_dns_option(store, policy.custom_dns, &policy.managed_comment).await?;

    if let Some(old) = &replaces {
        store
            .delete_lease(&old.id)
            .await
            .map_err(|e| CoreError::from_store("dynamic lease deletion", e))?;
        debug!(%ip, lease = %old.id, "removed dynamic lease");
    }

    let lease = store
        .create_lease(NewLease {
            address: ip,
            mac_address: mac,
            comment: policy.managed_comment.clone(),
            dhcp_option: option.name,
        })
        .await
        .map_err(|e| CoreError::from_store("lease creation", e))?;

    info!(%ip, lease = %lease.id, dns = %policy.custom_dns, "switched to custom DNS");
    Ok(lease)
}

/// MAC of the lease being replaced, else the ARP table's.
async fn identify<S: LeaseStore>(
    store: &S,
    ip: Ipv4Addr,
    replaces: Option<&Lease>,
) -> Result<MacAddress, CoreError> {
    if let Some(mac) = replaces.and_then(|l| l.mac_address.clone()) {
        return Ok(mac);
    }
    let entry = store
        .hardware_address(ip)
        .await
        .map_err(|e| CoreError::from_store("ARP lookup", e))?;
    match entry {
        Some(entry) => {
            debug!(%ip, mac = %entry.mac_address, "resolved identity from ARP");
            Ok(entry.mac_address)
        }
        None => Err(CoreError::NoIdentityFound { ip }),
    }
}
