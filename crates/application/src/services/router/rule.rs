use super::codes::{self, WILDCARD};
use crate::ports::DnsResolver;
use fancy_regex::Regex;
use ferrous_route_domain::RuleError;
use ipnetwork::IpNetwork;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

/// The parts of a query a rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct RouteQuery<'a> {
    /// Presentation form of the question name, with the trailing dot for FQDNs.
    pub name: &'a str,
    pub record_type: u16,
    pub class: u16,
    pub source_ip: IpAddr,
}

/// A compiled routing rule bound to the resolver that handles its matches.
pub struct Rule {
    record_type: u16,
    class: u16,
    name: Regex,
    source: Option<IpNetwork>,
    target: Arc<dyn DnsResolver>,
    target_name: Arc<str>,
}

impl Rule {
    /// Validate and compile a rule. Type, class, pattern and source are
    /// checked in that order and the first failure is returned.
    pub fn new(
        name_pattern: &str,
        class: &str,
        record_type: &str,
        source: &str,
        target: Arc<dyn DnsResolver>,
    ) -> Result<Self, RuleError> {
        let record_type = codes::type_code(record_type)?;
        let class = codes::class_code(class)?;
        let name = Regex::new(name_pattern).map_err(|e| RuleError::BadPattern {
            pattern: name_pattern.to_string(),
            reason: e.to_string(),
        })?;
        let source = if source.is_empty() {
            None
        } else {
            Some(parse_cidr(source)?)
        };
        let target_name: Arc<str> = Arc::from(target.to_string());

        Ok(Self {
            record_type,
            class,
            name,
            source,
            target,
            target_name,
        })
    }

    #[inline]
    pub fn matches(&self, query: &RouteQuery<'_>) -> bool {
        if self.record_type != WILDCARD && self.record_type != query.record_type {
            return false;
        }
        if self.class != WILDCARD && self.class != query.class {
            return false;
        }
        if !self.name.is_match(query.name).unwrap_or(false) {
            return false;
        }
        match &self.source {
            Some(network) => network.contains(canonical_ip(query.source_ip)),
            None => true,
        }
    }

    /// True for the catch-all rule: no type and an empty name pattern.
    pub fn is_default(&self) -> bool {
        self.record_type == WILDCARD && self.name.as_str().is_empty()
    }

    /// A default rule that also has no class or source restriction.
    pub fn matches_everything(&self) -> bool {
        self.is_default() && self.class == WILDCARD && self.source.is_none()
    }

    pub fn describe(&self) -> String {
        if self.is_default() {
            return format!("default->{}", self.target_name);
        }
        format!(
            "{}:{}->{}",
            self.name.as_str(),
            codes::type_name(self.record_type),
            self.target_name
        )
    }

    pub fn target(&self) -> &Arc<dyn DnsResolver> {
        &self.target
    }

    pub fn target_name(&self) -> &Arc<str> {
        &self.target_name
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match self.class {
            WILDCARD => "*".to_string(),
            code => codes::class_name(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string()),
        };
        f.debug_struct("Rule")
            .field("name", &self.name.as_str())
            .field("type", &codes::type_name(self.record_type))
            .field("class", &class)
            .field("source", &self.source)
            .field("target", &self.target_name)
            .finish()
    }
}

/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`, as reported by dual-stack
/// sockets) are matched as the IPv4 address they carry.
fn canonical_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        ip => ip,
    }
}

fn parse_cidr(cidr: &str) -> Result<IpNetwork, RuleError> {
    if !cidr.contains('/') {
        return Err(RuleError::BadCidr {
            cidr: cidr.to_string(),
            reason: "CIDR must include prefix (e.g., 10.0.0.0/8)".to_string(),
        });
    }
    IpNetwork::from_str(cidr).map_err(|e| RuleError::BadCidr {
        cidr: cidr.to_string(),
        reason: e.to_string(),
    })
}
