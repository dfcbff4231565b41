// dns-switcher-api: Async Rust client for the RouterOS REST API

pub mod error;
pub mod routeros;
pub mod transport;

pub use error::Error;
pub use routeros::RouterOsClient;
pub use routeros::models::{
    AddDhcpOption, AddLease, RosArpEntry, RosDhcpOption, RosIdentity, RosLease,
};
pub use transport::{TlsMode, TransportConfig};
