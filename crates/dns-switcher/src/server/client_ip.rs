// Client address resolution.
//
// A configured proxy header (default `x-real-ip`) wins when present;
// otherwise the TCP peer address is used. Only IPv4 clients can be managed.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::{HeaderMap, HeaderName};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientIpError {
    #[error("header {header} is not an IP address: {value:?}")]
    BadHeader { header: String, value: String },

    #[error("{0} is not an IPv4 client")]
    NotIpv4(IpAddr),
}

pub fn resolve_client_ip(
    headers: &HeaderMap,
    peer: SocketAddr,
    trusted_header: Option<&HeaderName>,
) -> Result<Ipv4Addr, ClientIpError> {
    let from_header = trusted_header.and_then(|name| headers.get(name).map(|v| (name, v)));

    let addr = match from_header {
        Some((name, value)) => {
            let bad = || ClientIpError::BadHeader {
                header: name.to_string(),
                value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            };
            // X-Forwarded-For style lists: the first entry is the client.
            let first = value
                .to_str()
                .map_err(|_| bad())?
                .split(',')
                .next()
                .unwrap_or_default()
                .trim();
            first.parse::<IpAddr>().map_err(|_| bad())?
        }
        None => peer.ip(),
    };

    match addr {
        IpAddr::V4(v4) => Ok(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped().ok_or(ClientIpError::NotIpv4(addr)),
    }
}
