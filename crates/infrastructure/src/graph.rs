use crate::dns::{StaticResponder, UpstreamResolver};
use ferrous_route_application::ports::DnsResolver;
use ferrous_route_application::services::{Router, RouterMetricsSnapshot};
use ferrous_route_domain::config::ResolverConfig;
use ferrous_route_domain::{Config, ConfigError};
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Every resolver and router described by a [`Config`], wired together.
///
/// Routers are built in file order, so by the time a router is built every
/// id it references already exists. Once built the graph is read-only.
pub struct ResolverGraph {
    nodes: HashMap<String, Arc<dyn DnsResolver>>,
    routers: Vec<Arc<Router>>,
    root: Arc<dyn DnsResolver>,
}

impl ResolverGraph {
    pub fn build(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut nodes: HashMap<String, Arc<dyn DnsResolver>> = HashMap::new();

        for resolver in &config.resolvers {
            let node: Arc<dyn DnsResolver> = match resolver {
                ResolverConfig::Upstream {
                    id,
                    address,
                    timeout_ms,
                } => {
                    let addr: SocketAddr = address.parse().map_err(|e| {
                        ConfigError::Validation(format!(
                            "Resolver '{}' has invalid address '{}': {}",
                            id, address, e
                        ))
                    })?;
                    debug!(resolver = %id, server = %addr, timeout_ms, "Upstream resolver created");
                    Arc::new(UpstreamResolver::new(
                        id.as_str(),
                        addr,
                        Duration::from_millis(*timeout_ms),
                    ))
                }
                ResolverConfig::Static { id, rcode } => {
                    debug!(resolver = %id, rcode = rcode.as_str(), "Static responder created");
                    Arc::new(StaticResponder::new(id.as_str(), *rcode))
                }
            };
            nodes.insert(resolver.id().to_string(), node);
        }

        let mut routers = Vec::with_capacity(config.routers.len());
        for router_config in &config.routers {
            let mut builder = Router::builder(router_config.id.as_str());

            for (index, route) in router_config.routes.iter().enumerate() {
                let target = nodes.get(&route.resolver).cloned().ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "Router '{}' references unknown resolver '{}'",
                        router_config.id, route.resolver
                    ))
                })?;

                builder
                    .add(
                        &route.name,
                        &route.class,
                        &route.record_type,
                        &route.source,
                        target,
                    )
                    .map_err(|source| ConfigError::Route {
                        router: router_config.id.clone(),
                        index,
                        source,
                    })?;
            }

            let router = Arc::new(builder.build());
            nodes.insert(router_config.id.clone(), router.clone() as Arc<dyn DnsResolver>);
            routers.push(router);
        }

        let root = nodes.get(&config.root).cloned().ok_or_else(|| {
            ConfigError::Validation(format!(
                "Root '{}' is not a configured resolver or router",
                config.root
            ))
        })?;

        info!(
            resolvers = config.resolvers.len(),
            routers = routers.len(),
            root = %config.root,
            "Resolver graph built"
        );

        Ok(Self {
            nodes,
            routers,
            root,
        })
    }

    /// Entry point for incoming queries.
    pub fn root(&self) -> &Arc<dyn DnsResolver> {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn DnsResolver>> {
        self.nodes.get(id)
    }

    pub fn routers(&self) -> &[Arc<Router>] {
        &self.routers
    }

    /// Current counters of every router, keyed by router id.
    pub fn metrics(&self) -> BTreeMap<String, RouterMetricsSnapshot> {
        self.routers
            .iter()
            .map(|router| (router.id().to_string(), router.metrics().snapshot()))
            .collect()
    }
}
