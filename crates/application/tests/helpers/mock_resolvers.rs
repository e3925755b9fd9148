use async_trait::async_trait;
use ferrous_route_application::ports::DnsResolver;
use ferrous_route_domain::{ClientInfo, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Resolver double that records every call and either echoes the question
/// back as an empty NOERROR response or returns a preset error.
pub struct MockDnsResolver {
    name: String,
    calls: AtomicUsize,
    clients: Mutex<Vec<IpAddr>>,
    listeners: Mutex<Vec<Option<Arc<str>>>>,
    error: Mutex<Option<DomainError>>,
}

impl MockDnsResolver {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            calls: AtomicUsize::new(0),
            clients: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
            error: Mutex::new(None),
        })
    }

    pub fn failing(name: &str, error: DomainError) -> Arc<Self> {
        let resolver = Self::new(name);
        resolver.set_error(Some(error));
        resolver
    }

    pub fn set_error(&self, error: Option<DomainError>) {
        *self.error.lock().unwrap() = error;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn clients(&self) -> Vec<IpAddr> {
        self.clients.lock().unwrap().clone()
    }

    pub fn listeners(&self) -> Vec<Option<Arc<str>>> {
        self.listeners.lock().unwrap().clone()
    }
}

impl fmt::Display for MockDnsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &Message, client: &ClientInfo) -> Result<Message, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.clients.lock().unwrap().push(client.source_ip);
        self.listeners.lock().unwrap().push(client.listener.clone());

        if let Some(error) = self.error.lock().unwrap().clone() {
            return Err(error);
        }

        let mut response = Message::new(query.id(), MessageType::Response, OpCode::Query);
        response.add_queries(query.queries().iter().cloned());
        Ok(response)
    }
}

pub fn make_query(domain: &str, record_type: RecordType) -> Message {
    make_query_with_class(domain, record_type, DNSClass::IN)
}

pub fn make_query_with_class(domain: &str, record_type: RecordType, class: DNSClass) -> Message {
    let mut query = Query::new();
    query.set_name(Name::from_str(domain).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(class);

    let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);
    message
}
