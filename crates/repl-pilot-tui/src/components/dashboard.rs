//! Dashboard component - aggregated cluster state and command keys
//!
//! Renders the shared view model the polling engine fills in and turns
//! operator keys into confirm-gated administrative commands. Cursor moves,
//! cluster cycling, and overlays are resolved locally; only answered
//! confirmations bubble up to the application loop.

use crate::action::Action;
use crate::components::Component;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};
use repl_pilot_core::{
    constants::{LOG_TAIL_LINES, MAX_DELAY_SETTING},
    formatting::gtid_string,
    AdminAction, ClusterSelection, ConnectivityTracker, SelectableList, SharedViewModel,
};
use replman_rs::AuthSession;
use std::sync::Arc;

/// One row of the servers table
#[derive(Debug, Clone)]
struct ServerRow {
    id: String,
    endpoint: String,
    state: String,
    delay: Option<i64>,
    gtid: String,
    maintenance: bool,
}

/// A command waiting for the operator's answer
#[derive(Debug, Clone)]
enum PendingCommand {
    /// A regular confirm-gated command
    Command(AdminAction),
    /// The pending named test (name lives in `pending_test`)
    NamedTest,
}

/// Dashboard component showing cluster state with command keys
pub struct DashboardComponent {
    /// View model filled in by the polling engine
    view: SharedViewModel,
    /// Shared connectivity state for the banner
    connectivity: Arc<ConnectivityTracker>,
    /// Cluster selection shared with the polling engine
    selection: ClusterSelection,
    /// Session state, read for the auth banner and cleared on logout
    auth: AuthSession,
    /// Server table rows with cursor
    servers: SelectableList<ServerRow>,
    /// Command awaiting confirmation
    pending: Option<PendingCommand>,
    /// Test-name input buffer (Some = input mode)
    input: Option<String>,
    /// Name of the test to run, cleared after dispatch
    pending_test: Option<String>,
}

impl DashboardComponent {
    pub fn new(
        view: SharedViewModel,
        connectivity: Arc<ConnectivityTracker>,
        selection: ClusterSelection,
        auth: AuthSession,
    ) -> Self {
        Self {
            view,
            connectivity,
            selection,
            auth,
            servers: SelectableList::default(),
            pending: None,
            input: None,
            pending_test: None,
        }
    }

    /// Pending test name, for the dispatcher to clear after dispatch
    pub fn pending_test_mut(&mut self) -> &mut Option<String> {
        &mut self.pending_test
    }

    pub fn pending_test(&self) -> Option<&str> {
        self.pending_test.as_deref()
    }

    /// Queue a command behind the confirmation overlay
    fn request(&mut self, action: AdminAction) {
        self.pending = Some(PendingCommand::Command(action));
    }

    /// Queue a cluster-scoped command only when a cluster is selected
    fn request_cluster_scoped(&mut self, action: AdminAction) {
        if self.selection.is_set() {
            self.request(action);
        } else {
            tracing::debug!("command ignored: no cluster selected");
        }
    }

    /// Queue a per-server command for the server under the cursor
    fn request_for_selected_server(&mut self, make: impl FnOnce(String) -> AdminAction) {
        if !self.selection.is_set() {
            return;
        }
        if let Some(row) = self.servers.selected() {
            let action = make(row.id.clone());
            self.request(action);
        }
    }

    /// Cycle the cluster selection through the monitor's cluster list
    fn cycle_cluster(&mut self, forward: bool) {
        let names = self.view.read().unwrap().cluster_names();
        if names.is_empty() {
            return;
        }

        let next = match self.selection.current() {
            None => 0,
            Some(current) => {
                let position = names.iter().position(|n| *n == current).unwrap_or(0);
                if forward {
                    (position + 1) % names.len()
                } else {
                    (position + names.len() - 1) % names.len()
                }
            }
        };
        self.selection.select(names[next].clone());
    }

    /// Rebuild the server rows from the view model, keeping the cursor
    fn refresh_rows(&mut self) {
        let rows = {
            let view = self.view.read().unwrap();
            view.servers
                .as_ref()
                .map(|servers| {
                    servers
                        .iter()
                        .map(|s| ServerRow {
                            id: s.id.clone(),
                            endpoint: s.endpoint(),
                            state: s.state.clone(),
                            delay: s.replication_delay,
                            gtid: gtid_string(Some(&s.current_gtid)),
                            maintenance: s.maintenance,
                        })
                        .collect()
                })
                .unwrap_or_default()
        };
        self.servers.update_items(rows);
    }

    fn bump_max_delay(&mut self, delta: i64) {
        let current = self.view.read().unwrap().max_delay();
        if let Some(value) = current {
            let value = (value + delta).max(0);
            self.request_cluster_scoped(AdminAction::SetSetting {
                setting: MAX_DELAY_SETTING.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match self.pending.take() {
                    Some(PendingCommand::Command(action)) => {
                        Some(Action::ResolveCommand(action, true))
                    }
                    Some(PendingCommand::NamedTest) => Some(Action::ResolveNamedTest(true)),
                    None => None,
                }
            }
            _ => {
                // Declining is a no-op: nothing is dispatched or recorded
                self.pending = None;
                None
            }
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(buffer) = &mut self.input else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                let name = self.input.take().unwrap_or_default();
                if !name.is_empty() {
                    self.pending_test = Some(name);
                    self.pending = Some(PendingCommand::NamedTest);
                }
            }
            KeyCode::Esc => self.input = None,
            _ => {}
        }
    }

    // ==================== Drawing ====================

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let cluster = self
            .selection
            .current()
            .unwrap_or_else(|| "no cluster selected".to_string());

        let mut spans = vec![
            Span::styled(" repl-pilot ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| cluster: "),
            Span::styled(cluster, Style::default().fg(Color::Cyan)),
        ];

        if !self.auth.has_auth_headers() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                " NOT AUTHENTICATED ",
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
        } else if self.connectivity.is_unreachable() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                " BACKEND UNREACHABLE ",
                Style::default().fg(Color::White).bg(Color::Red),
            ));
        }

        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn draw_servers(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec!["Id", "Endpoint", "State", "Delay", "GTID", "Flags"])
            .style(Style::default().fg(Color::Yellow));

        let rows: Vec<Row> = self
            .servers
            .items()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let delay = match s.delay {
                    Some(secs) => format!("{}s", secs),
                    None => "-".to_string(),
                };
                let flags = if s.maintenance { "maint" } else { "" };
                let state_color = match s.state.as_str() {
                    "Master" => Color::Green,
                    "Slave" => Color::Cyan,
                    "Failed" | "Suspect" => Color::Red,
                    _ => Color::Gray,
                };

                let style = if self.servers.is_selected(i) {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };

                Row::new(vec![
                    Span::raw(s.id.clone()),
                    Span::raw(s.endpoint.clone()),
                    Span::styled(s.state.clone(), Style::default().fg(state_color)),
                    Span::raw(delay),
                    Span::raw(s.gtid.clone()),
                    Span::raw(flags.to_string()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(22),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Min(20),
            Constraint::Length(6),
        ];

        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .title(" Servers ")
                .borders(Borders::ALL),
        );
        frame.render_widget(table, area);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect) {
        let view = self.view.read().unwrap();
        let mut lines = Vec::new();

        match &view.master {
            Some(master) => {
                lines.push(Line::from(vec![
                    Span::styled("Master: ", Style::default().fg(Color::Yellow)),
                    Span::styled(master.id.clone(), Style::default().fg(Color::Green)),
                    Span::raw(format!(" ({})  gtid ", master.endpoint())),
                    Span::raw(gtid_string(Some(&master.current_gtid))),
                ]));
            }
            None => lines.push(Line::from(vec![
                Span::styled("Master: ", Style::default().fg(Color::Yellow)),
                Span::styled("unknown", Style::default().fg(Color::DarkGray)),
            ])),
        }

        let slaves = view
            .slaves
            .as_ref()
            .map(|s| s.iter().map(|x| x.id.clone()).collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled("Slaves: ", Style::default().fg(Color::Yellow)),
            Span::raw(slaves),
        ]));

        let proxies = view
            .proxies
            .as_ref()
            .map(|p| {
                p.iter()
                    .map(|x| format!("{} ({})", x.id, x.kind))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled("Proxies: ", Style::default().fg(Color::Yellow)),
            Span::raw(proxies),
        ]));

        if let Some(alerts) = &view.alerts {
            let style = if alerts.errors.is_empty() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            lines.push(Line::from(vec![
                Span::styled("Alerts: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(
                        "{} errors, {} warnings",
                        alerts.errors.len(),
                        alerts.warnings.len()
                    ),
                    style,
                ),
            ]));
        }

        if let Some(settings) = &view.settings {
            lines.push(Line::from(vec![
                Span::styled("Settings: ", Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    "maxdelay={}  interactive={}  agents={}",
                    settings
                        .maxdelay
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    settings.interactive,
                    view.agents.len()
                )),
            ]));
        }

        let block = Block::default().title(" Cluster ").borders(Borders::ALL);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_logs(&self, frame: &mut Frame, area: Rect) {
        let view = self.view.read().unwrap();
        let visible = (area.height.saturating_sub(2) as usize).min(LOG_TAIL_LINES);

        let lines: Vec<Line> = view
            .logs
            .iter()
            .rev()
            .take(visible)
            .rev()
            .map(|log| {
                let level_color = match log.level.as_str() {
                    "ERROR" => Color::Red,
                    "WARN" | "WARNING" => Color::Yellow,
                    _ => Color::DarkGray,
                };
                Line::from(vec![
                    Span::styled(format!("{} ", log.timestamp), Style::default().fg(Color::DarkGray)),
                    Span::styled(format!("{:5} ", log.level), Style::default().fg(level_color)),
                    Span::raw(log.text.clone()),
                ])
            })
            .collect();

        let block = Block::default().title(" Monitor log ").borders(Borders::ALL);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let help = Line::from(vec![Span::styled(
            " f failover  w switchover  m maint  u start  x stop  o optimize  b backup  \
             t traffic  c reset-ctr  B bootstrap  P provision  U unprovision  R rolling  \
             T tests  n test  S sysbench  [/] cluster  q quit",
            Style::default().fg(Color::DarkGray),
        )]);
        frame.render_widget(Paragraph::new(help), area);
    }

    fn draw_confirmation(&self, frame: &mut Frame, area: Rect, prompt: &str) {
        let overlay_width = 60.min(area.width.saturating_sub(4));
        let prompt_lines: Vec<&str> = prompt.lines().collect();
        let overlay_height = (6 + prompt_lines.len() as u16).min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(overlay_width)) / 2;
        let y = (area.height.saturating_sub(overlay_height)) / 2;
        let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

        frame.render_widget(Clear, overlay_area);

        let mut lines = Vec::new();
        lines.push(Line::from(""));
        for text in prompt_lines {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}", text),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "  [y]",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Confirm    "),
            Span::styled(
                "[n]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Cancel"),
        ]));

        let block = Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect, buffer: &str) {
        let overlay_width = 50.min(area.width.saturating_sub(4));
        let overlay_height = 5;
        let x = (area.width.saturating_sub(overlay_width)) / 2;
        let y = (area.height.saturating_sub(overlay_height)) / 2;
        let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

        frame.render_widget(Clear, overlay_area);

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("  Test name: "),
                Span::styled(buffer.to_string(), Style::default().fg(Color::Cyan)),
                Span::styled("_", Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(vec![Span::styled(
                "  Enter to confirm, Esc to cancel",
                Style::default().fg(Color::DarkGray),
            )]),
        ];

        let block = Block::default()
            .title(" Run test ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
    }
}

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.pending.is_some() {
            return Ok(self.handle_overlay_key(key));
        }
        if self.input.is_some() {
            self.handle_input_key(key);
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('L') => return Ok(Some(Action::Logout)),
            KeyCode::Char('r') => return Ok(Some(Action::Refresh)),

            // Cluster cycling
            KeyCode::Tab | KeyCode::Char(']') => self.cycle_cluster(true),
            KeyCode::BackTab | KeyCode::Char('[') => self.cycle_cluster(false),

            // Server cursor
            KeyCode::Up | KeyCode::Char('k') => self.servers.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.servers.select_next(),

            // Cluster-level commands
            KeyCode::Char('f') => self.request_cluster_scoped(AdminAction::Failover),
            KeyCode::Char('w') => self.request_cluster_scoped(AdminAction::Switchover),
            KeyCode::Char('t') => self.request_cluster_scoped(AdminAction::ToggleTraffic),
            KeyCode::Char('c') => self.request_cluster_scoped(AdminAction::ResetFailoverCounter),
            KeyCode::Char('B') => self.request_cluster_scoped(AdminAction::Bootstrap),
            KeyCode::Char('P') => self.request_cluster_scoped(AdminAction::Provision),
            KeyCode::Char('U') => self.request_cluster_scoped(AdminAction::Unprovision),
            KeyCode::Char('R') => self.request_cluster_scoped(AdminAction::RollingRestart),
            KeyCode::Char('O') => self.request_cluster_scoped(AdminAction::OptimizeAll),
            KeyCode::Char('S') => self.request_cluster_scoped(AdminAction::Sysbench),
            KeyCode::Char('I') => self.request_cluster_scoped(AdminAction::SwitchSetting {
                setting: "interactive".to_string(),
            }),

            // Global commands
            KeyCode::Char('T') => self.request(AdminAction::RunAllTests),
            KeyCode::Char('a') => self.request(AdminAction::SetActive),

            // Per-server commands
            KeyCode::Char('m') => {
                self.request_for_selected_server(|server| AdminAction::Maintenance { server })
            }
            KeyCode::Char('u') => {
                self.request_for_selected_server(|server| AdminAction::StartServer { server })
            }
            KeyCode::Char('x') => {
                self.request_for_selected_server(|server| AdminAction::StopServer { server })
            }
            KeyCode::Char('o') => {
                self.request_for_selected_server(|server| AdminAction::OptimizeServer { server })
            }
            KeyCode::Char('b') => {
                self.request_for_selected_server(|server| AdminAction::PhysicalBackup { server })
            }

            // Max delay adjustment (dispatched as an explicit set command)
            KeyCode::Char('+') => self.bump_max_delay(1),
            KeyCode::Char('-') => self.bump_max_delay(-1),

            // Named test input
            KeyCode::Char('n') => self.input = Some(String::new()),

            // UI-local user index toggle
            KeyCode::Char('i') => {
                let index = self.servers.selected_index();
                self.view.write().unwrap().toggle_user_index(index);
            }

            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if matches!(action, Action::Tick) {
            self.refresh_rows();
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(1),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_servers(frame, chunks[1]);
        self.draw_detail(frame, chunks[2]);
        self.draw_logs(frame, chunks[3]);
        self.draw_footer(frame, chunks[4]);

        if let Some(pending) = &self.pending {
            let prompt = match pending {
                PendingCommand::Command(action) => action.prompt(),
                PendingCommand::NamedTest => AdminAction::RunNamedTest {
                    name: self.pending_test.clone().unwrap_or_default(),
                }
                .prompt(),
            };
            self.draw_confirmation(frame, area, &prompt);
        } else if let Some(buffer) = self.input.clone() {
            self.draw_input(frame, area, &buffer);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;
    use repl_pilot_core::view_model::ResourceUpdate;
    use repl_pilot_core::shared_view_model;
    use replman_rs::{Monitor, ServerStatus};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn dashboard(selected: bool) -> DashboardComponent {
        let selection = if selected {
            ClusterSelection::with_cluster("prod1")
        } else {
            ClusterSelection::new()
        };
        DashboardComponent::new(
            shared_view_model(),
            Arc::new(ConnectivityTracker::new()),
            selection,
            AuthSession::with_basic("admin", "repman"),
        )
    }

    fn seed_servers(dashboard: &mut DashboardComponent, ids: &[&str]) {
        dashboard.view.write().unwrap().apply(ResourceUpdate::Servers(
            ids.iter()
                .map(|id| ServerStatus {
                    id: id.to_string(),
                    ..Default::default()
                })
                .collect(),
        ));
        dashboard.refresh_rows();
    }

    #[test]
    fn test_command_key_opens_confirmation() {
        let mut dashboard = dashboard(true);
        let action = dashboard.handle_key_event(key(KeyCode::Char('f'))).unwrap();
        assert!(action.is_none());
        assert!(matches!(
            dashboard.pending,
            Some(PendingCommand::Command(AdminAction::Failover))
        ));
    }

    #[test]
    fn test_confirm_resolves_command() {
        let mut dashboard = dashboard(true);
        dashboard.handle_key_event(key(KeyCode::Char('w'))).unwrap();

        let action = dashboard.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        assert!(matches!(
            action,
            Some(Action::ResolveCommand(AdminAction::Switchover, true))
        ));
        assert!(dashboard.pending.is_none());
    }

    #[test]
    fn test_decline_clears_overlay_without_action() {
        let mut dashboard = dashboard(true);
        dashboard.handle_key_event(key(KeyCode::Char('f'))).unwrap();

        let action = dashboard.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        assert!(action.is_none());
        assert!(dashboard.pending.is_none());
    }

    #[test]
    fn test_cluster_scoped_command_requires_selection() {
        let mut dashboard = dashboard(false);
        dashboard.handle_key_event(key(KeyCode::Char('f'))).unwrap();
        assert!(dashboard.pending.is_none());

        // Global commands stay available
        dashboard.handle_key_event(key(KeyCode::Char('T'))).unwrap();
        assert!(matches!(
            dashboard.pending,
            Some(PendingCommand::Command(AdminAction::RunAllTests))
        ));
    }

    #[test]
    fn test_per_server_command_uses_cursor_row() {
        let mut dashboard = dashboard(true);
        seed_servers(&mut dashboard, &["db1", "db2", "db3"]);

        dashboard.handle_key_event(key(KeyCode::Down)).unwrap();
        dashboard.handle_key_event(key(KeyCode::Char('m'))).unwrap();

        match &dashboard.pending {
            Some(PendingCommand::Command(AdminAction::Maintenance { server })) => {
                assert_eq!(server, "db2");
            }
            other => panic!("unexpected pending command: {:?}", other),
        }
    }

    #[test]
    fn test_named_test_input_flow() {
        let mut dashboard = dashboard(true);

        dashboard.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        assert!(dashboard.input.is_some());

        for c in "semisync".chars() {
            dashboard.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        dashboard.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(dashboard.pending_test(), Some("semisync"));
        assert!(matches!(dashboard.pending, Some(PendingCommand::NamedTest)));

        let action = dashboard.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        assert!(matches!(action, Some(Action::ResolveNamedTest(true))));
    }

    #[test]
    fn test_cluster_cycling() {
        let mut dashboard = dashboard(false);
        dashboard.view.write().unwrap().apply(ResourceUpdate::Monitor(Monitor {
            clusters: vec!["alpha".to_string(), "beta".to_string()],
            ..Default::default()
        }));

        dashboard.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(dashboard.selection.current().as_deref(), Some("alpha"));

        dashboard.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(dashboard.selection.current().as_deref(), Some("beta"));

        dashboard.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(dashboard.selection.current().as_deref(), Some("alpha"));
    }

    #[test]
    fn test_user_index_toggle() {
        let mut dashboard = dashboard(true);
        seed_servers(&mut dashboard, &["db1", "db2"]);

        dashboard.handle_key_event(key(KeyCode::Char('i'))).unwrap();
        assert_eq!(dashboard.view.read().unwrap().selected_user_index, Some(0));

        dashboard.handle_key_event(key(KeyCode::Char('i'))).unwrap();
        assert_eq!(dashboard.view.read().unwrap().selected_user_index, None);
    }

    #[test]
    fn test_quit_and_logout_keys() {
        let mut dashboard = dashboard(true);
        assert!(matches!(
            dashboard.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::Quit)
        ));
        assert!(matches!(
            dashboard.handle_key_event(key(KeyCode::Char('L'))).unwrap(),
            Some(Action::Logout)
        ));
    }
}
