use async_trait::async_trait;
use ferrous_route_application::ports::DnsResolver;
use ferrous_route_domain::config::StaticRcode;
use ferrous_route_domain::{ClientInfo, DomainError};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Answers every query locally with an empty response and a fixed rcode.
pub struct StaticResponder {
    id: Arc<str>,
    rcode: ResponseCode,
}

impl StaticResponder {
    pub fn new(id: impl Into<Arc<str>>, rcode: StaticRcode) -> Self {
        Self {
            id: id.into(),
            rcode: to_response_code(rcode),
        }
    }

    pub fn response_code(&self) -> ResponseCode {
        self.rcode
    }
}

fn to_response_code(rcode: StaticRcode) -> ResponseCode {
    match rcode {
        StaticRcode::NoError => ResponseCode::NoError,
        StaticRcode::NxDomain => ResponseCode::NXDomain,
        StaticRcode::Refused => ResponseCode::Refused,
        StaticRcode::ServFail => ResponseCode::ServFail,
    }
}

#[async_trait]
impl DnsResolver for StaticResponder {
    async fn resolve(&self, query: &Message, client: &ClientInfo) -> Result<Message, DomainError> {
        debug!(
            resolver = %self.id,
            client = %client.source_ip,
            rcode = ?self.rcode,
            "Sending static response"
        );

        let mut response = Message::new(query.id(), MessageType::Response, query.op_code());
        response.set_recursion_desired(query.recursion_desired());
        response.set_response_code(self.rcode);
        response.add_queries(query.queries().iter().cloned());
        Ok(response)
    }
}

impl fmt::Display for StaticResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
