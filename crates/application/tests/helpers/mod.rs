#![allow(dead_code)]

mod mock_resolvers;

pub use mock_resolvers::{make_query, make_query_with_class, MockDnsResolver};
