//! Application state and main loop

use crate::action::Action;
use crate::audit;
use crate::components::{Component, DashboardComponent};
use crate::tui::{self, Tui};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use repl_pilot_core::{
    shared_view_model, AdminAction, ClusterSelection, ClusterStateAggregator, CommandDispatcher,
    ConnectivityTracker, DispatchOutcome, OperatorAnswer, PollingScheduler,
};
use replman_rs::{AuthSession, ConsoleConfig, ReplmanClient};
use std::sync::Arc;
use std::time::Duration;

/// Main application state
pub struct App {
    /// Whether the application should quit
    should_quit: bool,
    /// Dashboard component
    dashboard: DashboardComponent,
    /// Session state shared with the engine and the API client
    auth: AuthSession,
    /// Cluster selection shared with the engine
    selection: ClusterSelection,
    /// Polling engine
    aggregator: Arc<ClusterStateAggregator<ReplmanClient>>,
    /// Command dispatch
    dispatcher: CommandDispatcher<ReplmanClient>,
    /// Fixed-cadence driver
    scheduler: PollingScheduler,
    /// Poll interval
    refresh: Duration,
    /// Event poll timeout for UI ticks
    tick_rate: Duration,
}

impl App {
    pub fn new(
        config: &ConsoleConfig,
        initial_cluster: Option<String>,
        refresh_ms: u64,
    ) -> Result<Self> {
        let auth = match (&config.username, &config.password) {
            (Some(user), Some(password)) => AuthSession::with_basic(user, password),
            _ => AuthSession::new(),
        };

        let client = Arc::new(ReplmanClient::from_config(config, auth.clone())?);
        let view = shared_view_model();
        let connectivity = Arc::new(ConnectivityTracker::new());
        let selection = match initial_cluster {
            Some(name) => ClusterSelection::with_cluster(name),
            None => ClusterSelection::new(),
        };

        let aggregator = Arc::new(ClusterStateAggregator::new(
            client.clone(),
            Arc::new(auth.clone()),
            view.clone(),
            connectivity.clone(),
        ));
        let dispatcher = CommandDispatcher::new(client, selection.clone());
        let dashboard =
            DashboardComponent::new(view, connectivity, selection.clone(), auth.clone());

        audit::init_audit_logger();

        Ok(Self {
            should_quit: false,
            dashboard,
            auth,
            selection,
            aggregator,
            dispatcher,
            scheduler: PollingScheduler::new(),
            refresh: Duration::from_millis(refresh_ms),
            tick_rate: Duration::from_millis(100),
        })
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        tui::install_panic_hook();
        let mut terminal = tui::init()?;

        let result = self.main_loop(&mut terminal).await;

        tui::restore()?;
        result
    }

    /// Main event loop
    async fn main_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        self.start_polling();
        // First paint should not wait a full interval
        self.spawn_cycle();

        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                let _ = self.dashboard.draw(frame, area);
            })?;

            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = self.dashboard.handle_key_event(key)? {
                            self.handle_action(action).await?;
                        }
                    }
                    Event::Resize(w, h) => {
                        self.handle_action(Action::Resize(w, h)).await?;
                    }
                    _ => {}
                }
            } else {
                self.handle_action(Action::Tick).await?;
            }

            if self.should_quit {
                break;
            }
        }

        self.scheduler.stop();
        Ok(())
    }

    /// Begin polling at the fixed cadence.
    ///
    /// The selection is captured at each tick, so a cycle always runs
    /// against the cluster that was selected when it started.
    fn start_polling(&mut self) {
        let aggregator = self.aggregator.clone();
        let selection = self.selection.clone();
        self.scheduler.start(self.refresh, move || {
            let aggregator = aggregator.clone();
            let selection = selection.current();
            async move {
                aggregator.run_cycle(selection).await;
            }
        });
    }

    /// Run one cycle outside the cadence
    fn spawn_cycle(&self) {
        let aggregator = self.aggregator.clone();
        let selection = self.selection.current();
        tokio::spawn(async move {
            aggregator.run_cycle(selection).await;
        });
    }

    /// Handle an action
    async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                let _ = self.dashboard.update(Action::Tick)?;
            }
            Action::Resize(_, _) => {
                // Terminal resizes on next draw
            }
            Action::Refresh => {
                tracing::info!("manual refresh requested");
                self.spawn_cycle();
            }
            Action::Logout => {
                self.auth.logout();
                tracing::info!("operator logged out, polling suspended");
            }
            Action::ResolveCommand(admin, answer) => {
                let outcome = self
                    .dispatcher
                    .invoke(&admin, &OperatorAnswer(answer))
                    .await;
                self.record_outcome(&admin, outcome);
            }
            Action::ResolveNamedTest(answer) => {
                let target = self
                    .dashboard
                    .pending_test()
                    .unwrap_or_default()
                    .to_string();
                let outcome = self
                    .dispatcher
                    .run_named_test(self.dashboard.pending_test_mut(), &OperatorAnswer(answer))
                    .await;
                self.record_outcome(&AdminAction::RunNamedTest { name: target }, outcome);
            }
        }
        Ok(())
    }

    /// Record a dispatch outcome in the audit log.
    ///
    /// Declines leave no trace: they are indistinguishable from the command
    /// never having been invoked.
    fn record_outcome(&self, action: &AdminAction, outcome: DispatchOutcome) {
        let cluster = self.selection.current().unwrap_or_else(|| "-".to_string());
        match outcome {
            DispatchOutcome::Sent => {
                audit::audit_sent(&cluster, action.name(), &action.target(), "command dispatched");
            }
            DispatchOutcome::Failed => {
                audit::audit_failed(&cluster, action.name(), &action.target(), "dispatch failed");
            }
            DispatchOutcome::Declined => {}
        }
    }
}
