//! Administrative command dispatch
//!
//! Commands are best-effort, one-way directives: the operator confirms, one
//! GET is fired, the response body is ignored, and the effect shows up in
//! the next poll cycle. Declining a confirmation leaves no trace.

use crate::constants::TRAFFIC_SETTING;
use crate::selection::ClusterSelection;
use async_trait::async_trait;
use replman_rs::{ReplmanClient, ReplmanError};
use std::sync::Arc;

/// Operator confirmation capability
///
/// The dispatcher performs no side effect unless this answers affirmative.
/// The TUI backs it with a modal dialog; tests use a fixed answer.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// A [`Confirmation`] carrying an already-collected operator answer
pub struct OperatorAnswer(pub bool);

impl Confirmation for OperatorAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Where a command URL is rooted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandScope {
    /// Path under the selected cluster's base URL
    Cluster(String),
    /// Path under the backend base URL, independent of selection
    Global(String),
}

/// Every administrative command the console can issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Failover,
    Switchover,
    Maintenance { server: String },
    StartServer { server: String },
    StopServer { server: String },
    OptimizeServer { server: String },
    PhysicalBackup { server: String },
    ToggleTraffic,
    ResetFailoverCounter,
    SetActive,
    Bootstrap,
    Provision,
    Unprovision,
    RollingRestart,
    RunAllTests,
    RunNamedTest { name: String },
    OptimizeAll,
    Sysbench,
    SwitchSetting { setting: String },
    SetSetting { setting: String, value: String },
}

impl AdminAction {
    /// The literal confirmation message shown to the operator
    pub fn prompt(&self) -> String {
        match self {
            AdminAction::Failover => "Confirm failover".to_string(),
            AdminAction::Switchover => "Confirm switchover".to_string(),
            AdminAction::Maintenance { server } => {
                format!("Confirm maintenance for server-id: {}", server)
            }
            AdminAction::StartServer { server } => {
                format!("Confirm start for server-id: {}", server)
            }
            AdminAction::StopServer { server } => {
                format!("Confirm stop for server-id: {}", server)
            }
            AdminAction::OptimizeServer { server } => {
                format!("Confirm optimize for server-id: {}", server)
            }
            AdminAction::PhysicalBackup { .. } => "Confirm master physical backup".to_string(),
            AdminAction::ToggleTraffic => "Confirm toggle traffic".to_string(),
            AdminAction::ResetFailoverCounter => "Reset Failover counter?".to_string(),
            AdminAction::SetActive => "Confirm Active Status?".to_string(),
            AdminAction::Bootstrap => {
                "Bootstrap operation will destroy your existing replication setup.\nAre you really sure?"
                    .to_string()
            }
            AdminAction::Provision => "Provision Cluster.\nAre you really sure?".to_string(),
            AdminAction::Unprovision => {
                "Unprovision operation will destroy your existing data.\nAre you really sure?"
                    .to_string()
            }
            AdminAction::RollingRestart => "Confirm rolling restart".to_string(),
            AdminAction::RunAllTests => {
                "Confirm test run, this could cause replication to break!".to_string()
            }
            AdminAction::RunNamedTest { .. } => "Confirm run one test !".to_string(),
            AdminAction::OptimizeAll => "Confirm optimize all".to_string(),
            AdminAction::Sysbench => "Confirm sysbench run !".to_string(),
            AdminAction::SwitchSetting { setting } => {
                format!("Confirm toggle setting: {}", setting)
            }
            AdminAction::SetSetting { setting, value } => {
                format!("Confirm set {} = {}", setting, value)
            }
        }
    }

    /// The URL template this action dispatches to
    pub fn scope(&self) -> CommandScope {
        match self {
            AdminAction::Failover => CommandScope::Cluster("/actions/failover".to_string()),
            AdminAction::Switchover => CommandScope::Cluster("/actions/switchover".to_string()),
            AdminAction::Maintenance { server } => {
                CommandScope::Cluster(format!("/servers/{}/actions/maintenance", server))
            }
            AdminAction::StartServer { server } => {
                CommandScope::Cluster(format!("/servers/{}/actions/start", server))
            }
            AdminAction::StopServer { server } => {
                CommandScope::Cluster(format!("/servers/{}/actions/stop", server))
            }
            AdminAction::OptimizeServer { server } => {
                CommandScope::Cluster(format!("/servers/{}/actions/optimize", server))
            }
            AdminAction::PhysicalBackup { server } => {
                CommandScope::Cluster(format!("/servers/{}/actions/physical-backup", server))
            }
            AdminAction::ToggleTraffic => {
                CommandScope::Cluster(format!("/settings/actions/switch/{}", TRAFFIC_SETTING))
            }
            AdminAction::ResetFailoverCounter => {
                CommandScope::Cluster("/actions/reset-failover-counter".to_string())
            }
            AdminAction::SetActive => CommandScope::Global("/api/setactive".to_string()),
            AdminAction::Bootstrap => {
                CommandScope::Cluster("/services/actions/bootstrap".to_string())
            }
            AdminAction::Provision => {
                CommandScope::Cluster("/services/actions/provision".to_string())
            }
            AdminAction::Unprovision => {
                CommandScope::Cluster("/services/actions/unprovision".to_string())
            }
            AdminAction::RollingRestart => CommandScope::Cluster("/actions/rolling".to_string()),
            AdminAction::RunAllTests => CommandScope::Global("/api/tests".to_string()),
            AdminAction::RunNamedTest { name } => {
                CommandScope::Cluster(format!("/tests/actions/run/{}", name))
            }
            AdminAction::OptimizeAll => CommandScope::Cluster("/actions/optimize".to_string()),
            AdminAction::Sysbench => CommandScope::Cluster("/actions/sysbench".to_string()),
            AdminAction::SwitchSetting { setting } => {
                CommandScope::Cluster(format!("/settings/actions/switch/{}", setting))
            }
            AdminAction::SetSetting { setting, value } => {
                CommandScope::Cluster(format!("/settings/actions/set/{}/{}", setting, value))
            }
        }
    }

    /// Short operation name for the audit log
    pub fn name(&self) -> &'static str {
        match self {
            AdminAction::Failover => "FAILOVER",
            AdminAction::Switchover => "SWITCHOVER",
            AdminAction::Maintenance { .. } => "MAINTENANCE",
            AdminAction::StartServer { .. } => "START",
            AdminAction::StopServer { .. } => "STOP",
            AdminAction::OptimizeServer { .. } => "OPTIMIZE",
            AdminAction::PhysicalBackup { .. } => "PHYSICAL_BACKUP",
            AdminAction::ToggleTraffic => "TOGGLE_TRAFFIC",
            AdminAction::ResetFailoverCounter => "RESET_FAILOVER_COUNTER",
            AdminAction::SetActive => "SET_ACTIVE",
            AdminAction::Bootstrap => "BOOTSTRAP",
            AdminAction::Provision => "PROVISION",
            AdminAction::Unprovision => "UNPROVISION",
            AdminAction::RollingRestart => "ROLLING_RESTART",
            AdminAction::RunAllTests => "RUN_ALL_TESTS",
            AdminAction::RunNamedTest { .. } => "RUN_TEST",
            AdminAction::OptimizeAll => "OPTIMIZE_ALL",
            AdminAction::Sysbench => "SYSBENCH",
            AdminAction::SwitchSetting { .. } => "SWITCH_SETTING",
            AdminAction::SetSetting { .. } => "SET_SETTING",
        }
    }

    /// Target description for the audit log
    pub fn target(&self) -> String {
        match self {
            AdminAction::Maintenance { server }
            | AdminAction::StartServer { server }
            | AdminAction::StopServer { server }
            | AdminAction::OptimizeServer { server }
            | AdminAction::PhysicalBackup { server } => server.clone(),
            AdminAction::RunNamedTest { name } => name.clone(),
            AdminAction::SwitchSetting { setting } => setting.clone(),
            AdminAction::SetSetting { setting, value } => format!("{}={}", setting, value),
            _ => "cluster".to_string(),
        }
    }
}

/// One-way request transport for commands
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Fire a one-way GET to an absolute URL, discarding the body
    async fn dispatch(&self, url: &str) -> Result<(), ReplmanError>;

    /// Base URL for cluster-scoped command paths
    fn cluster_base(&self, cluster: &str) -> String;

    /// Base URL for global command paths
    fn global_base(&self) -> String;
}

#[async_trait]
impl CommandSink for ReplmanClient {
    async fn dispatch(&self, url: &str) -> Result<(), ReplmanError> {
        ReplmanClient::dispatch(self, url).await
    }

    fn cluster_base(&self, cluster: &str) -> String {
        ReplmanClient::cluster_base(self, cluster)
    }

    fn global_base(&self) -> String {
        self.base_url().to_string()
    }
}

/// Terminal outcome of a dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The operator declined; nothing was sent
    Declined,
    /// The request was sent and the backend answered success
    Sent,
    /// The request could not be sent or the backend answered failure;
    /// not surfaced beyond the diagnostic channel
    Failed,
}

/// Builds command URLs, gates them behind confirmation, fires them one-way
pub struct CommandDispatcher<S> {
    sink: Arc<S>,
    selection: ClusterSelection,
}

impl<S: CommandSink> CommandDispatcher<S> {
    pub fn new(sink: Arc<S>, selection: ClusterSelection) -> Self {
        Self { sink, selection }
    }

    /// Absolute URL an action would dispatch to right now.
    ///
    /// `None` when the action is cluster-scoped and no cluster is selected.
    pub fn command_url(&self, action: &AdminAction) -> Option<String> {
        match action.scope() {
            CommandScope::Global(path) => Some(format!("{}{}", self.sink.global_base(), path)),
            CommandScope::Cluster(path) => {
                let cluster = self.selection.current()?;
                Some(format!("{}{}", self.sink.cluster_base(&cluster), path))
            }
        }
    }

    /// Confirm and fire one action.
    ///
    /// A negative answer is a no-op with no side effect. Success and failure
    /// of the request are both terminal; the caller observes the command's
    /// effect through the next poll cycle.
    pub async fn invoke(
        &self,
        action: &AdminAction,
        confirm: &dyn Confirmation,
    ) -> DispatchOutcome {
        if !confirm.confirm(&action.prompt()) {
            return DispatchOutcome::Declined;
        }
        self.fire(action).await
    }

    /// Fire an action without confirmation.
    ///
    /// Only the reactive setting propagation uses this directly.
    pub async fn fire(&self, action: &AdminAction) -> DispatchOutcome {
        let Some(url) = self.command_url(action) else {
            tracing::warn!(action = action.name(), "command dropped: no cluster selected");
            return DispatchOutcome::Failed;
        };

        match self.sink.dispatch(&url).await {
            Ok(()) => {
                tracing::info!(action = action.name(), %url, "command sent");
                DispatchOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(action = action.name(), %url, "command failed: {e}");
                DispatchOutcome::Failed
            }
        }
    }

    /// Confirm and run the pending named test.
    ///
    /// The pending name is cleared after dispatch regardless of the request
    /// outcome; declining leaves it in place (and sends nothing).
    pub async fn run_named_test(
        &self,
        pending: &mut Option<String>,
        confirm: &dyn Confirmation,
    ) -> DispatchOutcome {
        let Some(name) = pending.clone() else {
            return DispatchOutcome::Declined;
        };

        let action = AdminAction::RunNamedTest { name };
        if !confirm.confirm(&action.prompt()) {
            return DispatchOutcome::Declined;
        }

        let outcome = self.fire(&action).await;
        *pending = None;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_DELAY_SETTING;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records every dispatched URL; optionally fails all requests
    #[derive(Default)]
    struct RecordingSink {
        urls: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl CommandSink for RecordingSink {
        async fn dispatch(&self, url: &str) -> Result<(), ReplmanError> {
            self.urls.lock().unwrap().push(url.to_string());
            if self.fail {
                Err(ReplmanError::Status {
                    status: 500,
                    url: url.to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn cluster_base(&self, cluster: &str) -> String {
            format!("http://repman/api/clusters/{}", cluster)
        }

        fn global_base(&self) -> String {
            "http://repman".to_string()
        }
    }

    fn dispatcher(fail: bool) -> (CommandDispatcher<RecordingSink>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink {
            fail,
            ..Default::default()
        });
        let selection = ClusterSelection::with_cluster("prod1");
        (CommandDispatcher::new(sink.clone(), selection), sink)
    }

    #[tokio::test]
    async fn test_decline_sends_nothing() {
        let (dispatcher, sink) = dispatcher(false);
        let outcome = dispatcher
            .invoke(&AdminAction::Failover, &OperatorAnswer(false))
            .await;
        assert_eq!(outcome, DispatchOutcome::Declined);
        assert!(sink.urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_sends_exactly_one_request() {
        let (dispatcher, sink) = dispatcher(false);
        let outcome = dispatcher
            .invoke(&AdminAction::Failover, &OperatorAnswer(true))
            .await;
        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(
            *sink.urls.lock().unwrap(),
            vec!["http://repman/api/clusters/prod1/actions/failover".to_string()]
        );
    }

    #[tokio::test]
    async fn test_action_urls() {
        let (dispatcher, _) = dispatcher(false);
        let base = "http://repman/api/clusters/prod1";

        let cases: Vec<(AdminAction, String)> = vec![
            (AdminAction::Switchover, format!("{base}/actions/switchover")),
            (
                AdminAction::Maintenance {
                    server: "db2".to_string(),
                },
                format!("{base}/servers/db2/actions/maintenance"),
            ),
            (
                AdminAction::StartServer {
                    server: "db2".to_string(),
                },
                format!("{base}/servers/db2/actions/start"),
            ),
            (
                AdminAction::StopServer {
                    server: "db2".to_string(),
                },
                format!("{base}/servers/db2/actions/stop"),
            ),
            (
                AdminAction::OptimizeServer {
                    server: "db2".to_string(),
                },
                format!("{base}/servers/db2/actions/optimize"),
            ),
            (
                AdminAction::PhysicalBackup {
                    server: "db2".to_string(),
                },
                format!("{base}/servers/db2/actions/physical-backup"),
            ),
            (
                AdminAction::ToggleTraffic,
                format!("{base}/settings/actions/switch/database-hearbeat"),
            ),
            (
                AdminAction::ResetFailoverCounter,
                format!("{base}/actions/reset-failover-counter"),
            ),
            (AdminAction::SetActive, "http://repman/api/setactive".to_string()),
            (AdminAction::Bootstrap, format!("{base}/services/actions/bootstrap")),
            (AdminAction::Provision, format!("{base}/services/actions/provision")),
            (
                AdminAction::Unprovision,
                format!("{base}/services/actions/unprovision"),
            ),
            (AdminAction::RollingRestart, format!("{base}/actions/rolling")),
            (AdminAction::RunAllTests, "http://repman/api/tests".to_string()),
            (
                AdminAction::RunNamedTest {
                    name: "switchover_all_slaves_delay".to_string(),
                },
                format!("{base}/tests/actions/run/switchover_all_slaves_delay"),
            ),
            (AdminAction::OptimizeAll, format!("{base}/actions/optimize")),
            (AdminAction::Sysbench, format!("{base}/actions/sysbench")),
            (
                AdminAction::SwitchSetting {
                    setting: "interactive".to_string(),
                },
                format!("{base}/settings/actions/switch/interactive"),
            ),
            (
                AdminAction::SetSetting {
                    setting: MAX_DELAY_SETTING.to_string(),
                    value: "30".to_string(),
                },
                format!("{base}/settings/actions/set/failover-max-slave-delay/30"),
            ),
        ];

        for (action, expected) in cases {
            assert_eq!(dispatcher.command_url(&action).unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_cluster_scoped_action_without_selection() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = CommandDispatcher::new(sink.clone(), ClusterSelection::new());

        assert!(dispatcher.command_url(&AdminAction::Failover).is_none());
        // Global actions still resolve
        assert_eq!(
            dispatcher.command_url(&AdminAction::RunAllTests).unwrap(),
            "http://repman/api/tests"
        );

        let outcome = dispatcher
            .invoke(&AdminAction::Failover, &OperatorAnswer(true))
            .await;
        assert_eq!(outcome, DispatchOutcome::Failed);
        assert!(sink.urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_failure_is_terminal() {
        let (dispatcher, sink) = dispatcher(true);
        let outcome = dispatcher
            .invoke(&AdminAction::Sysbench, &OperatorAnswer(true))
            .await;
        assert_eq!(outcome, DispatchOutcome::Failed);
        // Exactly one attempt, no retry
        assert_eq!(sink.urls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_named_test_clears_pending_on_success() {
        let (dispatcher, sink) = dispatcher(false);
        let mut pending = Some("failover_semisync".to_string());

        let outcome = dispatcher
            .run_named_test(&mut pending, &OperatorAnswer(true))
            .await;
        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(pending, None);
        assert_eq!(
            *sink.urls.lock().unwrap(),
            vec!["http://repman/api/clusters/prod1/tests/actions/run/failover_semisync".to_string()]
        );
    }

    #[tokio::test]
    async fn test_run_named_test_clears_pending_on_failure() {
        // Cleared after dispatch regardless of the request outcome
        let (dispatcher, _) = dispatcher(true);
        let mut pending = Some("failover_semisync".to_string());

        let outcome = dispatcher
            .run_named_test(&mut pending, &OperatorAnswer(true))
            .await;
        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(pending, None);
    }

    #[tokio::test]
    async fn test_run_named_test_decline_keeps_pending() {
        let (dispatcher, sink) = dispatcher(false);
        let mut pending = Some("failover_semisync".to_string());

        let outcome = dispatcher
            .run_named_test(&mut pending, &OperatorAnswer(false))
            .await;
        assert_eq!(outcome, DispatchOutcome::Declined);
        assert_eq!(pending.as_deref(), Some("failover_semisync"));
        assert!(sink.urls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_prompts_are_literal() {
        assert_eq!(AdminAction::Failover.prompt(), "Confirm failover");
        assert_eq!(
            AdminAction::Maintenance {
                server: "db3".to_string()
            }
            .prompt(),
            "Confirm maintenance for server-id: db3"
        );
        assert_eq!(AdminAction::ResetFailoverCounter.prompt(), "Reset Failover counter?");
        assert!(AdminAction::Bootstrap.prompt().contains("destroy your existing replication setup"));
    }
}
