//! High-level replication-manager API client
//!
//! Provides a convenient interface for polling cluster state and dispatching
//! administrative commands against a replication-manager backend.

use crate::auth::AuthSession;
use crate::config::ConsoleConfig;
use crate::error::ReplmanError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Default request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for a replication-manager backend.
///
/// All resource reads are plain GETs keyed by an optional `clusterName`
/// query parameter; all commands are one-way GETs whose response bodies are
/// discarded.
#[derive(Debug, Clone)]
pub struct ReplmanClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthSession,
}

impl ReplmanClient {
    /// Create a new client for the given backend URL.
    pub fn new(base_url: impl Into<String>, auth: AuthSession) -> Result<Self, ReplmanError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Create a client from a console configuration.
    pub fn from_config(config: &ConsoleConfig, auth: AuthSession) -> Result<Self, ReplmanError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Get the backend base URL for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The auth session this client sends headers from.
    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    /// Base URL for cluster-scoped command endpoints.
    pub fn cluster_base(&self, cluster: &str) -> String {
        format!("{}/api/clusters/{}", self.base_url, cluster)
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.get(url);
        if let Some(authorization) = self.auth.authorization() {
            req = req.header(reqwest::header::AUTHORIZATION, authorization);
        }
        req
    }

    /// GET a resource endpoint and decode it against its schema.
    ///
    /// A payload that does not decode fails this fetch only, through the same
    /// error channel as a transport failure.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        cluster: Option<&str>,
        resource: &'static str,
    ) -> Result<T, ReplmanError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.request(&url);
        if let Some(name) = cluster {
            req = req.query(&[("clusterName", name)]);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReplmanError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ReplmanError::Decode { resource, source })
    }

    // ==================== Resource endpoints ====================

    /// Global monitor state: settings, log buffer, agents, known clusters.
    pub async fn monitor(&self) -> Result<Monitor, ReplmanError> {
        self.get_json("/api/monitor", None, "monitor").await
    }

    /// Summary of one cluster.
    pub async fn cluster_summary(&self, cluster: &str) -> Result<ClusterSummary, ReplmanError> {
        self.get_json("/api/cluster", Some(cluster), "cluster").await
    }

    /// All database servers of one cluster.
    pub async fn servers(&self, cluster: &str) -> Result<Vec<ServerStatus>, ReplmanError> {
        self.get_json("/api/servers", Some(cluster), "servers").await
    }

    /// Current alerts (errors and warnings) of one cluster.
    pub async fn alerts(&self, cluster: &str) -> Result<Alerts, ReplmanError> {
        self.get_json("/api/alerts", Some(cluster), "alerts").await
    }

    /// The current master of one cluster.
    pub async fn master(&self, cluster: &str) -> Result<ServerStatus, ReplmanError> {
        self.get_json("/api/master", Some(cluster), "master").await
    }

    /// Proxies routing traffic for one cluster.
    pub async fn proxies(&self, cluster: &str) -> Result<Vec<Proxy>, ReplmanError> {
        self.get_json("/api/proxies", Some(cluster), "proxies").await
    }

    /// Replicas of one cluster.
    pub async fn slaves(&self, cluster: &str) -> Result<Vec<ServerStatus>, ReplmanError> {
        self.get_json("/api/slaves", Some(cluster), "slaves").await
    }

    // ==================== Command endpoints ====================

    /// Fire a one-way command GET, discarding the response body.
    ///
    /// `url` must be absolute (built from [`cluster_base`](Self::cluster_base)
    /// or [`base_url`](Self::base_url)). Only success/failure is reported;
    /// the effect of the command is observed through the next poll.
    pub async fn dispatch(&self, url: &str) -> Result<(), ReplmanError> {
        let response = self.request(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReplmanError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }
}

// ==================== Resource payloads ====================

/// Global monitor payload. Doubles as the settings object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Monitor {
    /// Names of the clusters this backend manages
    pub clusters: Vec<String>,
    /// Maximum tolerated replica delay for failover, seconds
    pub maxdelay: Option<i64>,
    /// Whether the monitor requires operator interaction for failover
    pub interactive: bool,
    /// Monitor log ring buffer
    pub logs: LogBuffer,
    /// Registered provisioning agents
    pub agents: Vec<Agent>,
}

/// Monitor log ring buffer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogBuffer {
    pub buffer: Vec<LogLine>,
}

/// One line of the monitor log buffer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogLine {
    pub timestamp: String,
    pub level: String,
    pub text: String,
}

/// A provisioning agent registered with the monitor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub host_name: String,
    pub status: String,
}

/// Summary of one managed cluster
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterSummary {
    pub name: String,
    pub topology: String,
    pub active_passive_status: String,
    pub is_provisioned: bool,
    pub is_failable: bool,
    pub failover_counter: i64,
}

/// State of one database server
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerStatus {
    pub id: String,
    pub host: String,
    pub port: String,
    pub state: String,
    pub fail_count: i64,
    pub ignored: bool,
    pub maintenance: bool,
    pub replication_delay: Option<i64>,
    pub current_gtid: Vec<GtidRecord>,
    pub slave_gtid: Vec<GtidRecord>,
}

impl ServerStatus {
    /// "host:port" display form
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A replication position: one element of a GTID set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GtidRecord {
    pub domain_id: u64,
    pub server_id: u64,
    pub seq_no: u64,
}

/// Alerts raised by the monitor for one cluster
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alerts {
    pub errors: Vec<Alert>,
    pub warnings: Vec<Alert>,
}

/// One alert entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alert {
    pub number: String,
    pub desc: String,
    pub from: String,
}

/// State of one proxy
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Proxy {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub host: String,
    pub port: String,
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cluster_base_url() {
        let client = ReplmanClient::new("http://localhost:10001/", AuthSession::new()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:10001");
        assert_eq!(
            client.cluster_base("prod1"),
            "http://localhost:10001/api/clusters/prod1"
        );
    }

    #[test]
    fn test_decode_monitor() {
        let json = r#"{
            "clusters": ["prod1", "staging"],
            "maxdelay": 30,
            "interactive": true,
            "logs": {"buffer": [{"timestamp": "2024-05-02 10:00:01", "level": "INFO", "text": "monitor started"}]},
            "agents": [{"id": "agent1", "hostName": "db-agent-1", "status": "ONLINE"}]
        }"#;
        let monitor: Monitor = serde_json::from_str(json).unwrap();
        assert_eq!(monitor.clusters, vec!["prod1", "staging"]);
        assert_eq!(monitor.maxdelay, Some(30));
        assert!(monitor.interactive);
        assert_eq!(monitor.logs.buffer.len(), 1);
        assert_eq!(monitor.agents[0].host_name, "db-agent-1");
    }

    #[test]
    fn test_decode_monitor_missing_fields() {
        // Lenient schema: absent fields fall back to defaults, maxdelay stays undefined
        let monitor: Monitor = serde_json::from_str("{}").unwrap();
        assert!(monitor.clusters.is_empty());
        assert_eq!(monitor.maxdelay, None);
    }

    #[test]
    fn test_decode_server_with_gtid() {
        let json = r#"{
            "id": "db1",
            "host": "10.0.0.1",
            "port": "3306",
            "state": "Slave",
            "failCount": 2,
            "replicationDelay": 5,
            "currentGtid": [{"domainId": 0, "serverId": 101, "seqNo": 42}],
            "slaveGtid": [{"domainId": 0, "serverId": 100, "seqNo": 41}]
        }"#;
        let server: ServerStatus = serde_json::from_str(json).unwrap();
        assert_eq!(server.endpoint(), "10.0.0.1:3306");
        assert_eq!(server.fail_count, 2);
        assert_eq!(server.current_gtid[0].server_id, 101);
        assert_eq!(server.slave_gtid[0].seq_no, 41);
    }

    #[test]
    fn test_decode_alerts_and_proxies() {
        let alerts: Alerts = serde_json::from_str(
            r#"{"errors": [{"number": "ERR00012", "desc": "master down", "from": "monitor"}], "warnings": []}"#,
        )
        .unwrap();
        assert_eq!(alerts.errors.len(), 1);
        assert!(alerts.warnings.is_empty());

        let proxy: Proxy = serde_json::from_str(
            r#"{"id": "px1", "type": "maxscale", "host": "10.0.0.9", "port": "4006", "state": "running"}"#,
        )
        .unwrap();
        assert_eq!(proxy.kind, "maxscale");
    }
}
