use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Per-client DNS mode, derived from the lease table on every request.
///
/// The upper-case names are the wire form used by the HTTP API and CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DnsMode {
    /// Static lease owned by this tool, pointing at the custom DNS option.
    Custom,
    /// No lease, or a router-issued dynamic one.
    Default,
    /// Static lease owned by someone else.
    Unmanaged,
}
