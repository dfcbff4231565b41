//! DNS-mode reconciliation between HTTP/CLI consumers and a router's DHCP tables.
//!
//! Every client on the LAN is in one of three [`DnsMode`]s, derived from the
//! DHCP lease the router holds for its IP:
//!
//! - **[`resolver`]**: pure mapping from a lease (or its absence) to a mode.
//! - **[`engine`]**: plan/execute pipeline that moves a client into `CUSTOM`
//!   or back to `DEFAULT`, refusing to touch leases it does not own.
//! - **[`provisioner`]**: get-or-create of the router-global DHCP option that
//!   carries the operator's custom DNS server.
//! - **[`Switcher`]**: facade that opens one [`LeaseStore`] session per call
//!   through a [`StoreConnector`] and always closes it again.
//!
//! The router is consumed only through the [`LeaseStore`] trait. The RouterOS
//! REST implementation lives in [`store::routeros`].

pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod model;
pub mod provisioner;
pub mod resolver;
pub mod store;
pub mod switcher;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_MANAGED_COMMENT, DnsPolicy, RouterConfig, TlsVerification};
pub use engine::{ResetPlan, SwitchPlan};
pub use error::CoreError;
pub use model::{
    ArpEntry, DhcpOption, DnsMode, Lease, MacAddress, NewDhcpOption, NewLease, RecordId,
};
pub use provisioner::{CUSTOM_DNS_OPTION_NAME, DNS_SERVERS_OPTION_CODE};
pub use store::routeros::{RouterOsConnector, RouterOsStore};
pub use store::{LeaseStore, StoreConnector, StoreError};
pub use switcher::Switcher;
