// ── Core error types ──
//
// Failures of the reconciliation logic. Consumers never see HTTP status
// codes or JSON parse failures from the router directly; store failures
// arrive as `StoreError` and are classified here.

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::store::StoreError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Engine outcomes ──────────────────────────────────────────────
    /// No lease and no resolved ARP entry for the client.
    #[error("No hardware address known for {ip}: no DHCP lease and no ARP entry")]
    NoIdentityFound { ip: Ipv4Addr },

    /// A lease exists for the client that this tool does not own.
    #[error("Lease for {ip} is not managed by dns-switcher (comment: {comment:?})")]
    ForeignLeaseConflict { ip: Ipv4Addr, comment: String },

    // ── Store failures ───────────────────────────────────────────────
    #[error("Router unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("Router rejected {operation}: {reason}")]
    StoreRejected { operation: String, reason: String },

    #[error("Failed to create DHCP option {name:?}: {reason}")]
    OptionCreationFailed { name: String, reason: String },

    #[error("Invalid router response: {reason}")]
    InvalidStoreResponse { reason: String },
}

impl CoreError {
    /// Classify a store failure that happened during `operation`.
    pub fn from_store(operation: &str, err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => Self::StoreUnavailable { reason },
            StoreError::Rejected(reason) => Self::StoreRejected {
                operation: operation.to_owned(),
                reason,
            },
            StoreError::Malformed(reason) => Self::InvalidStoreResponse { reason },
        }
    }

    /// Short machine-readable code, used by the HTTP envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoIdentityFound { .. } => "no_identity_found",
            Self::ForeignLeaseConflict { .. } => "foreign_lease_conflict",
            Self::StoreUnavailable { .. } => "store_unavailable",
            Self::StoreRejected { .. } => "store_rejected",
            Self::OptionCreationFailed { .. } => "option_creation_failed",
            Self::InvalidStoreResponse { .. } => "invalid_store_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_keeps_operation_name() {
        let err = CoreError::from_store("lease creation", StoreError::Rejected("duplicate".into()));
        assert_eq!(err.to_string(), "Router rejected lease creation: duplicate");
        assert_eq!(err.code(), "store_rejected");
    }

    #[test]
    fn unavailable_and_malformed_ignore_operation() {
        assert!(matches!(
            CoreError::from_store("lease lookup", StoreError::Unavailable("refused".into())),
            CoreError::StoreUnavailable { .. }
        ));
        assert!(matches!(
            CoreError::from_store("lease lookup", StoreError::Malformed("bad ip".into())),
            CoreError::InvalidStoreResponse { .. }
        ));
    }
}
