use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Per-router counters, keyed by target resolver name.
///
/// Owned by a single router so several routers in one process never share
/// state. Increments are safe from concurrent `resolve` calls.
#[derive(Default)]
pub struct RouterMetrics {
    route: DashMap<Arc<str>, u64>,

    failure: DashMap<Arc<str>, u64>,

    available: AtomicU64,
}

impl RouterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_route(&self, target: &Arc<str>) {
        self.route
            .entry(target.clone())
            .and_modify(|c| *c += 1)
            .or_insert(1);
    }

    pub(crate) fn record_failure(&self, target: &Arc<str>) {
        self.failure
            .entry(target.clone())
            .and_modify(|c| *c += 1)
            .or_insert(1);
    }

    pub(crate) fn add_available(&self) {
        self.available.fetch_add(1, Ordering::Relaxed);
    }

    pub fn route_count(&self, target: &str) -> u64 {
        self.route.get(target).map(|v| *v).unwrap_or(0)
    }

    pub fn failure_count(&self, target: &str) -> u64 {
        self.failure.get(target).map(|v| *v).unwrap_or(0)
    }

    pub fn available(&self) -> u64 {
        self.available.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> RouterMetricsSnapshot {
        RouterMetricsSnapshot {
            route: collect(&self.route),
            failure: collect(&self.failure),
            available: self.available(),
        }
    }
}

fn collect(map: &DashMap<Arc<str>, u64>) -> BTreeMap<String, u64> {
    map.iter()
        .map(|entry| (entry.key().to_string(), *entry.value()))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouterMetricsSnapshot {
    pub route: BTreeMap<String, u64>,
    pub failure: BTreeMap<String, u64>,
    pub available: u64,
}

impl RouterMetricsSnapshot {
    /// Flatten into `router.<id>.route[<target>]` style keys.
    pub fn export(&self, router_id: &str) -> Vec<(String, u64)> {
        let mut out = Vec::with_capacity(self.route.len() + self.failure.len() + 1);
        for (target, count) in &self.route {
            out.push((format!("router.{}.route[{}]", router_id, target), *count));
        }
        for (target, count) in &self.failure {
            out.push((format!("router.{}.failure[{}]", router_id, target), *count));
        }
        out.push((format!("router.{}.available", router_id), self.available));
        out
    }
}
