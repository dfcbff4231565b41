// ── Lease Store abstraction ──
//
// The only view of the router the engine has. One store value is one
// session; `StoreConnector` opens and closes them.

pub mod routeros;

use std::future::Future;
use std::net::Ipv4Addr;

use thiserror::Error;

use crate::model::{ArpEntry, DhcpOption, Lease, NewDhcpOption, NewLease, RecordId};

/// Failure reported by a Lease Store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the session.
    #[error("{0}")]
    Unavailable(String),
    /// The store understood the request and refused it.
    #[error("{0}")]
    Rejected(String),
    /// A response could not be decoded into the domain model.
    #[error("{0}")]
    Malformed(String),
}

/// Client to the router's DHCP lease, ARP, and DHCP-option tables.
///
/// Absent records are `Ok(None)`, never an error.
pub trait LeaseStore: Send + Sync {
    fn lease_by_address(
        &self,
        ip: Ipv4Addr,
    ) -> impl Future<Output = Result<Option<Lease>, StoreError>> + Send;

    /// ARP lookup. Incomplete entries (no resolved MAC) are `None`.
    fn hardware_address(
        &self,
        ip: Ipv4Addr,
    ) -> impl Future<Output = Result<Option<ArpEntry>, StoreError>> + Send;

    fn create_lease(
        &self,
        lease: NewLease,
    ) -> impl Future<Output = Result<Lease, StoreError>> + Send;

    fn delete_lease(&self, id: &RecordId) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn option_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DhcpOption>, StoreError>> + Send;

    fn create_option(
        &self,
        option: NewDhcpOption,
    ) -> impl Future<Output = Result<DhcpOption, StoreError>> + Send;
}

/// Opens and closes Lease Store sessions.
pub trait StoreConnector: Send + Sync {
    type Store: LeaseStore;

    fn open(&self) -> impl Future<Output = Result<Self::Store, StoreError>> + Send;

    /// Release a session. The default drops it.
    fn close(&self, store: Self::Store) -> impl Future<Output = ()> + Send {
        async move { drop(store) }
    }
}
