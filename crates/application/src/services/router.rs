//! Rule-based query dispatch.
//!
//! A [`RouterBuilder`] collects rules during configuration; [`RouterBuilder::build`]
//! freezes them into a [`Router`] that can be shared across tasks. The router
//! evaluates only the first question of a query against its rules in insertion
//! order and hands the query to the target of the first rule that matches.

pub mod codes;
pub mod metrics;
pub mod rule;

pub use metrics::{RouterMetrics, RouterMetricsSnapshot};
pub use rule::{RouteQuery, Rule};

use crate::ports::DnsResolver;
use async_trait::async_trait;
use ferrous_route_domain::{ClientInfo, DomainError, RuleError};
use hickory_proto::op::Message;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Router {
    id: Arc<str>,
    rules: Arc<[Rule]>,
    metrics: RouterMetrics,
}

impl Router {
    pub fn builder(id: impl Into<Arc<str>>) -> RouterBuilder {
        RouterBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    /// First rule, in insertion order, that matches the query.
    pub fn select(&self, query: &RouteQuery<'_>) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(query))
    }
}

#[async_trait]
impl DnsResolver for Router {
    async fn resolve(&self, query: &Message, client: &ClientInfo) -> Result<Message, DomainError> {
        let question = query.queries().first().ok_or(DomainError::InvalidQuery)?;
        let name = question.name().to_string();
        let listener = client.listener.as_deref().unwrap_or("-");
        let route_query = RouteQuery {
            name: &name,
            record_type: u16::from(question.query_type()),
            class: u16::from(question.query_class()),
            source_ip: client.source_ip,
        };

        let Some(rule) = self.select(&route_query) else {
            debug!(
                router = %self.id,
                domain = %name,
                record_type = %question.query_type(),
                client = %client.source_ip,
            listener,
                "No route for query"
            );
            return Err(DomainError::NoRoute(format!(
                "{} {} {}",
                name,
                question.query_class(),
                question.query_type()
            )));
        };

        debug!(
            router = %self.id,
            rule = %rule,
            resolver = %rule.target_name(),
            domain = %name,
            record_type = %question.query_type(),
            client = %client.source_ip,
            listener,
            "Routing query to resolver"
        );

        self.metrics.record_route(rule.target_name());
        let result = rule.target().resolve(query, client).await;
        if let Err(ref e) = result {
            self.metrics.record_failure(rule.target_name());
            warn!(
                router = %self.id,
                resolver = %rule.target_name(),
                domain = %name,
                error = %e,
                "Resolver failed"
            );
        }
        result
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Configuration phase of a [`Router`].
///
/// Rules are appended in the order they are added. A default rule (empty
/// pattern, no type) shadows everything added after it, so add it last.
pub struct RouterBuilder {
    id: Arc<str>,
    rules: Vec<Rule>,
    metrics: RouterMetrics,
}

impl RouterBuilder {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            rules: Vec::new(),
            metrics: RouterMetrics::new(),
        }
    }

    /// Validate a rule and append it. On error nothing is appended and the
    /// `available` gauge is left alone.
    pub fn add(
        &mut self,
        name_pattern: &str,
        class: &str,
        record_type: &str,
        source: &str,
        target: Arc<dyn DnsResolver>,
    ) -> Result<(), RuleError> {
        let rule = Rule::new(name_pattern, class, record_type, source, target)?;

        if let Some(previous) = self.rules.iter().find(|r| r.matches_everything()) {
            warn!(
                router = %self.id,
                default_rule = %previous,
                rule = %rule,
                "Rule added after the default rule is unreachable"
            );
        }
        debug!(router = %self.id, rule = %rule, "Route added");

        self.rules.push(rule);
        self.metrics.add_available();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn build(self) -> Router {
        info!(router = %self.id, rules = self.rules.len(), "Router created");
        Router {
            id: self.id,
            rules: self.rules.into(),
            metrics: self.metrics,
        }
    }
}
