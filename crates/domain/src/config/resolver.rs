use serde::{Deserialize, Serialize};

/// A terminal resolver that routes can point at.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolverConfig {
    /// Forwards queries over UDP to a single upstream server.
    Upstream {
        id: String,

        address: String,

        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },

    /// Answers every query locally with a fixed response code.
    Static {
        id: String,

        #[serde(default)]
        rcode: StaticRcode,
    },
}

impl ResolverConfig {
    pub fn id(&self) -> &str {
        match self {
            Self::Upstream { id, .. } | Self::Static { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum StaticRcode {
    NoError,

    #[default]
    NxDomain,

    Refused,

    ServFail,
}

impl StaticRcode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::NxDomain => "NXDOMAIN",
            Self::Refused => "REFUSED",
            Self::ServFail => "SERVFAIL",
        }
    }
}

fn default_timeout_ms() -> u64 {
    2000
}
