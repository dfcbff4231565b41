// RouterOS REST response types
//
// RouterOS serializes every scalar as a JSON string, including booleans
// (`"true"`/`"false"`) and numbers. Keys are kebab-case and the record
// identifier lives under `.id`. Fields use `#[serde(default)]` liberally
// because menu output varies between RouterOS releases.

use serde::{Deserialize, Deserializer, Serialize};

// ── Error body ───────────────────────────────────────────────────────

/// Error payload returned alongside 4xx/5xx statuses:
/// ```json
/// { "error": 400, "message": "Bad Request", "detail": "failure: ..." }
/// ```
#[derive(Debug, Deserialize)]
pub(crate) struct RosErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

// ── DHCP lease ───────────────────────────────────────────────────────

/// Row from `/ip/dhcp-server/lease`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosLease {
    #[serde(rename = ".id")]
    pub id: String,
    pub address: String,
    #[serde(default, rename = "mac-address")]
    pub mac_address: Option<String>,
    #[serde(default, deserialize_with = "ros_bool")]
    pub dynamic: bool,
    #[serde(default, deserialize_with = "ros_bool")]
    pub disabled: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, rename = "dhcp-option")]
    pub dhcp_option: Option<String>,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "host-name")]
    pub host_name: Option<String>,
    /// Catch-all for fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body for `PUT /ip/dhcp-server/lease`.
#[derive(Debug, Clone, Serialize)]
pub struct AddLease<'a> {
    pub address: &'a str,
    #[serde(rename = "mac-address")]
    pub mac_address: &'a str,
    pub comment: &'a str,
    #[serde(rename = "dhcp-option")]
    pub dhcp_option: &'a str,
}

// ── ARP ──────────────────────────────────────────────────────────────

/// Row from `/ip/arp`. Incomplete entries have no `mac-address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosArpEntry {
    #[serde(rename = ".id")]
    pub id: String,
    pub address: String,
    #[serde(default, rename = "mac-address")]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default, deserialize_with = "ros_bool")]
    pub dynamic: bool,
    #[serde(default, deserialize_with = "ros_bool")]
    pub complete: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── DHCP option ──────────────────────────────────────────────────────

/// Row from `/ip/dhcp-server/option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosDhcpOption {
    #[serde(rename = ".id")]
    pub id: String,
    pub name: String,
    /// Numeric option code, serialized as a string (`"6"`).
    pub code: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body for `PUT /ip/dhcp-server/option`.
#[derive(Debug, Clone, Serialize)]
pub struct AddDhcpOption<'a> {
    pub name: &'a str,
    pub code: String,
    pub value: &'a str,
    pub comment: &'a str,
}

// ── System ───────────────────────────────────────────────────────────

/// `/system/identity` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosIdentity {
    pub name: String,
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Accept RouterOS string booleans as well as native JSON booleans.
fn ros_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => Ok(b),
        Raw::Str(s) => match s.as_str() {
            "true" | "yes" => Ok(true),
            "false" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected RouterOS boolean, got {other:?}"
            ))),
        },
    }
}
