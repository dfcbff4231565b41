use std::sync::Arc;

use axum::http::HeaderName;

use dns_switcher_core::Switcher;

/// Shared state for all handlers.
pub struct AppState<C> {
    pub switcher: Arc<Switcher<C>>,
    /// Trusted proxy header carrying the client address.
    pub client_ip_header: Option<HeaderName>,
}

impl<C> AppState<C> {
    pub fn new(switcher: Switcher<C>, client_ip_header: Option<HeaderName>) -> Self {
        Self {
            switcher: Arc::new(switcher),
            client_ip_header,
        }
    }
}

// Manual impl: `C` itself need not be `Clone`.
impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            switcher: Arc::clone(&self.switcher),
            client_ip_header: self.client_ip_header.clone(),
        }
    }
}
