use async_trait::async_trait;
use ferrous_route_domain::{ClientInfo, DomainError};
use hickory_proto::op::Message;
use std::fmt;

/// Anything that can answer a DNS query: a router, an upstream forwarder,
/// a static responder.
///
/// `Display` must yield a stable name; it is used as the label in logs and
/// router metrics.
#[async_trait]
pub trait DnsResolver: Send + Sync + fmt::Display {
    async fn resolve(&self, query: &Message, client: &ClientInfo) -> Result<Message, DomainError>;
}
