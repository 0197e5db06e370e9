//! Aggregated console state produced by polling cycles
//!
//! Each field of the [`ViewModel`] has exactly one writer: the fetch for its
//! resource kind. A failed fetch leaves its field untouched, so stale data
//! stays visible until a later cycle replaces it.

use crate::connectivity::ResourceKind;
use replman_rs::{Agent, Alerts, ClusterSummary, LogLine, Monitor, Proxy, ServerStatus};
use std::sync::{Arc, RwLock};

/// One successfully fetched resource payload
#[derive(Debug, Clone)]
pub enum ResourceUpdate {
    Monitor(Monitor),
    ClusterSummary(ClusterSummary),
    Servers(Vec<ServerStatus>),
    Alerts(Alerts),
    Master(ServerStatus),
    Proxies(Vec<Proxy>),
    Slaves(Vec<ServerStatus>),
}

impl ResourceUpdate {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceUpdate::Monitor(_) => ResourceKind::Monitor,
            ResourceUpdate::ClusterSummary(_) => ResourceKind::ClusterSummary,
            ResourceUpdate::Servers(_) => ResourceKind::Servers,
            ResourceUpdate::Alerts(_) => ResourceKind::Alerts,
            ResourceUpdate::Master(_) => ResourceKind::Master,
            ResourceUpdate::Proxies(_) => ResourceKind::Proxies,
            ResourceUpdate::Slaves(_) => ResourceKind::Slaves,
        }
    }
}

/// The state the dashboard renders
#[derive(Debug, Default)]
pub struct ViewModel {
    /// Global monitor settings (the monitor payload doubles as settings)
    pub settings: Option<Monitor>,
    /// Monitor log buffer
    pub logs: Vec<LogLine>,
    /// Registered provisioning agents
    pub agents: Vec<Agent>,
    /// Summary of the selected cluster
    pub cluster: Option<ClusterSummary>,
    /// Database servers of the selected cluster
    pub servers: Option<Vec<ServerStatus>>,
    /// Current alerts of the selected cluster
    pub alerts: Option<Alerts>,
    /// Current master of the selected cluster
    pub master: Option<ServerStatus>,
    /// Proxies of the selected cluster
    pub proxies: Option<Vec<Proxy>>,
    /// Replicas of the selected cluster
    pub slaves: Option<Vec<ServerStatus>>,
    /// UI-local toggle, unrelated to cluster data
    pub selected_user_index: Option<usize>,
}

impl ViewModel {
    /// Merge one fetch outcome into its field
    pub fn apply(&mut self, update: ResourceUpdate) {
        match update {
            ResourceUpdate::Monitor(monitor) => {
                self.logs = monitor.logs.buffer.clone();
                self.agents = monitor.agents.clone();
                self.settings = Some(monitor);
            }
            ResourceUpdate::ClusterSummary(cluster) => self.cluster = Some(cluster),
            ResourceUpdate::Servers(servers) => self.servers = Some(servers),
            ResourceUpdate::Alerts(alerts) => self.alerts = Some(alerts),
            ResourceUpdate::Master(master) => self.master = Some(master),
            ResourceUpdate::Proxies(proxies) => self.proxies = Some(proxies),
            ResourceUpdate::Slaves(slaves) => self.slaves = Some(slaves),
        }
    }

    /// Current value of the maximum replica delay setting
    pub fn max_delay(&self) -> Option<i64> {
        self.settings.as_ref().and_then(|s| s.maxdelay)
    }

    /// Cluster names known to the monitor
    pub fn cluster_names(&self) -> Vec<String> {
        self.settings
            .as_ref()
            .map(|s| s.clusters.clone())
            .unwrap_or_default()
    }

    /// Toggle the UI-local user index: selecting the same index clears it
    pub fn toggle_user_index(&mut self, index: usize) {
        if self.selected_user_index == Some(index) {
            self.selected_user_index = None;
        } else {
            self.selected_user_index = Some(index);
        }
    }
}

/// The view model shared between the polling engine and the dashboard
pub type SharedViewModel = Arc<RwLock<ViewModel>>;

pub fn shared_view_model() -> SharedViewModel {
    Arc::new(RwLock::new(ViewModel::default()))
}
