//! One polling cycle: fan out resource fetches, merge outcomes
//!
//! A cycle fetches the cluster-independent monitor state and, when a cluster
//! is selected, the six cluster-scoped collections, all concurrently. Each
//! outcome is applied to the shared view model as it settles, so the legacy
//! connectivity flag ends up with the last-settling fetch's verdict.
//!
//! Cycles have no cross-cycle memory: overlapping cycles neither wait for
//! nor cancel each other's in-flight fetches.

use crate::commands::CommandSink;
use crate::connectivity::{ConnectivityTracker, ResourceKind};
use crate::constants::MAX_DELAY_SETTING;
use crate::fetcher::ResourceFetcher;
use crate::view_model::SharedViewModel;
use crate::watch::MaxDelayWatch;
use futures::stream::{FuturesUnordered, StreamExt};
use replman_rs::{AuthSession, ReplmanError};
use std::sync::{Arc, Mutex};

/// Narrow view of the externally owned session state
pub trait AuthGate: Send + Sync {
    fn has_auth_headers(&self) -> bool;
    fn logout(&self);
}

impl AuthGate for AuthSession {
    fn has_auth_headers(&self) -> bool {
        AuthSession::has_auth_headers(self)
    }

    fn logout(&self) {
        AuthSession::logout(self)
    }
}

/// Runs poll cycles against a fetcher and merges the results
pub struct ClusterStateAggregator<F> {
    fetcher: Arc<F>,
    auth: Arc<dyn AuthGate>,
    view: SharedViewModel,
    connectivity: Arc<ConnectivityTracker>,
    max_delay: Mutex<MaxDelayWatch>,
}

impl<F> ClusterStateAggregator<F>
where
    F: ResourceFetcher + CommandSink,
{
    pub fn new(
        fetcher: Arc<F>,
        auth: Arc<dyn AuthGate>,
        view: SharedViewModel,
        connectivity: Arc<ConnectivityTracker>,
    ) -> Self {
        Self {
            fetcher,
            auth,
            view,
            connectivity,
            max_delay: Mutex::new(MaxDelayWatch::new()),
        }
    }

    pub fn view(&self) -> &SharedViewModel {
        &self.view
    }

    pub fn connectivity(&self) -> &Arc<ConnectivityTracker> {
        &self.connectivity
    }

    /// Run one poll cycle for the selection captured at cycle start.
    ///
    /// Without auth headers the cycle is a complete no-op (not an error).
    /// Failed fetches leave their view-model field stale and only flip the
    /// connectivity state; nothing here ever propagates an error upward.
    pub async fn run_cycle(&self, selection: Option<String>) {
        if !self.auth.has_auth_headers() {
            tracing::debug!("poll cycle skipped: not authenticated");
            return;
        }

        let cluster = selection.as_deref();

        let mut fetches = FuturesUnordered::new();
        fetches.push(self.fetch_one(ResourceKind::Monitor, None));
        if cluster.is_some() {
            for kind in ResourceKind::CLUSTER_SCOPED {
                fetches.push(self.fetch_one(kind, cluster));
            }
        }

        while let Some((kind, result)) = fetches.next().await {
            match result {
                Ok(update) => {
                    self.view.write().unwrap().apply(update);
                    self.connectivity.record_success(kind);
                    if kind == ResourceKind::Monitor {
                        self.propagate_max_delay_if_changed(cluster).await;
                    }
                }
                Err(e) => {
                    tracing::warn!(resource = kind.as_str(), "fetch failed: {e}");
                    self.connectivity.record_failure(kind);
                }
            }
        }
    }

    async fn fetch_one(
        &self,
        kind: ResourceKind,
        cluster: Option<&str>,
    ) -> (ResourceKind, Result<crate::view_model::ResourceUpdate, ReplmanError>) {
        (kind, self.fetcher.fetch(kind, cluster).await)
    }

    /// Push the maximum replica delay back to the backend when its value
    /// changed to a defined one. The only command fired without operator
    /// confirmation; at most once per actual value change.
    async fn propagate_max_delay_if_changed(&self, cluster: Option<&str>) {
        let current = self.view.read().unwrap().max_delay();
        let fire = self.max_delay.lock().unwrap().observe(current);

        let Some(value) = fire else {
            return;
        };
        let Some(cluster) = cluster else {
            tracing::debug!(value, "max delay changed with no cluster selected, not propagated");
            return;
        };

        let url = format!(
            "{}/settings/actions/set/{}/{}",
            self.fetcher.cluster_base(cluster),
            MAX_DELAY_SETTING,
            value
        );
        match self.fetcher.dispatch(&url).await {
            Ok(()) => tracing::info!(value, "max replica delay propagated"),
            Err(e) => tracing::warn!(value, "max replica delay propagation failed: {e}"),
        }
    }
}
