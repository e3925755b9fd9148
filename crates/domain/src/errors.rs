use thiserror::Error;

/// Errors raised while answering a query.
///
/// `InvalidQuery` and `NoRoute` come from the router itself; every other
/// variant originates in a downstream resolver and is handed back to the
/// caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No question in query")]
    InvalidQuery,

    #[error("No route for {0}")]
    NoRoute(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),
}

/// Errors raised while adding a rule to a router.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Unknown type '{0}'")]
    UnknownType(String),

    #[error("Unknown class '{0}'")]
    UnknownClass(String),

    #[error("Invalid name pattern '{pattern}': {reason}")]
    BadPattern { pattern: String, reason: String },

    #[error("Invalid CIDR format '{cidr}': {reason}")]
    BadCidr { cidr: String, reason: String },
}
