//! Connectivity tracking across concurrent resource fetches
//!
//! Every fetch records its outcome here. Two things are kept:
//!
//! - the legacy reachability flag the dashboard banner reads, with its
//!   original semantics: any failure sets it, and only the cluster-summary
//!   and servers fetches clear it on success. With concurrent fetches the
//!   final value is the last-settling fetch's; callers apply outcomes in
//!   completion order, which makes that explicit.
//! - a per-resource record (outcome + timestamp) from which deterministic
//!   aggregate indicators can be derived.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// The resource collections fetched each poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Cluster-independent monitor state (settings, logs, agents)
    Monitor,
    ClusterSummary,
    Servers,
    Alerts,
    Master,
    Proxies,
    Slaves,
}

impl ResourceKind {
    /// The six cluster-scoped kinds, fetched only when a cluster is selected
    pub const CLUSTER_SCOPED: [ResourceKind; 6] = [
        ResourceKind::ClusterSummary,
        ResourceKind::Servers,
        ResourceKind::Alerts,
        ResourceKind::Master,
        ResourceKind::Proxies,
        ResourceKind::Slaves,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Monitor => "monitor",
            ResourceKind::ClusterSummary => "cluster",
            ResourceKind::Servers => "servers",
            ResourceKind::Alerts => "alerts",
            ResourceKind::Master => "master",
            ResourceKind::Proxies => "proxies",
            ResourceKind::Slaves => "slaves",
        }
    }

    /// Only cluster-summary and servers successes clear the legacy flag.
    /// The other fetches set it on failure but leave it alone on success.
    fn clears_flag_on_success(self) -> bool {
        matches!(self, ResourceKind::ClusterSummary | ResourceKind::Servers)
    }
}

/// Outcome of the most recent fetch of one resource kind
#[derive(Debug, Clone, Copy)]
pub struct FetchRecord {
    pub ok: bool,
    pub at: Instant,
}

/// Shared connectivity state with one writer per settling fetch
#[derive(Debug, Default)]
pub struct ConnectivityTracker {
    unreachable: AtomicBool,
    records: Mutex<HashMap<ResourceKind, FetchRecord>>,
}

impl ConnectivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful fetch of `kind`
    pub fn record_success(&self, kind: ResourceKind) {
        self.records
            .lock()
            .unwrap()
            .insert(kind, FetchRecord { ok: true, at: Instant::now() });
        if kind.clears_flag_on_success() {
            self.unreachable.store(false, Ordering::Relaxed);
        }
    }

    /// Record a failed fetch of `kind`
    pub fn record_failure(&self, kind: ResourceKind) {
        self.records
            .lock()
            .unwrap()
            .insert(kind, FetchRecord { ok: false, at: Instant::now() });
        self.unreachable.store(true, Ordering::Relaxed);
    }

    /// Legacy reachability flag read by the dashboard banner
    pub fn is_unreachable(&self) -> bool {
        self.unreachable.load(Ordering::Relaxed)
    }

    /// Most recent outcome for one resource kind
    pub fn record(&self, kind: ResourceKind) -> Option<FetchRecord> {
        self.records.lock().unwrap().get(&kind).copied()
    }

    /// Deterministic aggregate: unreachable iff fetches have run and none of
    /// the most recent ones succeeded
    pub fn derived_unreachable(&self) -> bool {
        let records = self.records.lock().unwrap();
        !records.is_empty() && records.values().all(|r| !r.ok)
    }
}
