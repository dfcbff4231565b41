// ── Domain model ──
//
// Canonical records decoded from the router, independent of the wire format.

pub mod ids;
pub mod lease;
pub mod mode;

pub use ids::{MacAddress, RecordId};
pub use lease::{ArpEntry, DhcpOption, Lease, NewDhcpOption, NewLease};
pub use mode::DnsMode;
