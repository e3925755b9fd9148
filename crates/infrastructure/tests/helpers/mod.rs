#![allow(dead_code)]

mod dns_server_mock;

pub use dns_server_mock::{make_query, MockDnsServer, MockReply};
