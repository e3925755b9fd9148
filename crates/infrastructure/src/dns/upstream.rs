use super::transport::UdpTransport;
use async_trait::async_trait;
use ferrous_route_application::ports::DnsResolver;
use ferrous_route_domain::{ClientInfo, DomainError};
use hickory_proto::op::{Message, MessageType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Forwards queries unchanged to a single upstream server over UDP.
pub struct UpstreamResolver {
    id: Arc<str>,
    transport: UdpTransport,
    timeout: Duration,
}

impl UpstreamResolver {
    pub fn new(id: impl Into<Arc<str>>, server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            id: id.into(),
            transport: UdpTransport::new(server_addr),
            timeout,
        }
    }

    fn serialize(&self, message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| DomainError::Transport {
            server: self.transport.server_addr().to_string(),
            reason: format!("Failed to serialize DNS message: {}", e),
        })?;

        Ok(buf)
    }
}

#[async_trait]
impl DnsResolver for UpstreamResolver {
    async fn resolve(&self, query: &Message, client: &ClientInfo) -> Result<Message, DomainError> {
        let bytes = self.serialize(query)?;

        debug!(
            resolver = %self.id,
            server = %self.transport.server_addr(),
            client = %client.source_ip,
            "Forwarding query upstream"
        );

        let reply = self.transport.send(&bytes, self.timeout).await?;
        let response = Message::from_vec(&reply).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if response.id() != query.id() {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response id {} does not match query id {}",
                response.id(),
                query.id()
            )));
        }
        if response.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "Upstream reply is not a response".to_string(),
            ));
        }

        Ok(response)
    }
}

impl fmt::Display for UpstreamResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
