use std::net::IpAddr;
use std::sync::Arc;

/// Metadata about the client that sent a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub source_ip: IpAddr,
    /// Name of the listener the query arrived on, if known.
    pub listener: Option<Arc<str>>,
}

impl ClientInfo {
    pub fn new(source_ip: IpAddr) -> Self {
        Self {
            source_ip,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl Into<Arc<str>>) -> Self {
        self.listener = Some(listener.into());
        self
    }
}
