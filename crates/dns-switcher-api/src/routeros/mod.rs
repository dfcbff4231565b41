// RouterOS REST client modules
//
// Hand-written client for the `/rest` surface of RouterOS v7. Each menu
// path (`ip/dhcp-server/lease`, `ip/arp`, ...) gets its own file with
// inherent methods on `RouterOsClient`.

pub mod arp;
pub mod client;
pub mod leases;
pub mod models;
pub mod options;
pub mod system;

pub use client::RouterOsClient;
