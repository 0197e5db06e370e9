//! Resource fetching contract
//!
//! The aggregator is written against this trait so cycles can be exercised
//! in tests without a backend. [`ReplmanClient`] is the production fetcher.

use crate::connectivity::ResourceKind;
use crate::view_model::ResourceUpdate;
use async_trait::async_trait;
use replman_rs::{ReplmanClient, ReplmanError};

/// Retrieves one named resource collection for a given cluster
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch one resource kind. `cluster` is required for the cluster-scoped
    /// kinds and ignored for [`ResourceKind::Monitor`].
    async fn fetch(
        &self,
        kind: ResourceKind,
        cluster: Option<&str>,
    ) -> Result<ResourceUpdate, ReplmanError>;
}

#[async_trait]
impl ResourceFetcher for ReplmanClient {
    async fn fetch(
        &self,
        kind: ResourceKind,
        cluster: Option<&str>,
    ) -> Result<ResourceUpdate, ReplmanError> {
        if kind == ResourceKind::Monitor {
            return Ok(ResourceUpdate::Monitor(self.monitor().await?));
        }

        let cluster = cluster.ok_or(ReplmanError::NoClusterSelected)?;
        match kind {
            ResourceKind::Monitor => unreachable!("handled above"),
            ResourceKind::ClusterSummary => self
                .cluster_summary(cluster)
                .await
                .map(ResourceUpdate::ClusterSummary),
            ResourceKind::Servers => self.servers(cluster).await.map(ResourceUpdate::Servers),
            ResourceKind::Alerts => self.alerts(cluster).await.map(ResourceUpdate::Alerts),
            ResourceKind::Master => self.master(cluster).await.map(ResourceUpdate::Master),
            ResourceKind::Proxies => self.proxies(cluster).await.map(ResourceUpdate::Proxies),
            ResourceKind::Slaves => self.slaves(cluster).await.map(ResourceUpdate::Slaves),
        }
    }
}
