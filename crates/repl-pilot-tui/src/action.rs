//! Actions for the repl-pilot TUI
//!
//! Actions represent events that cross from the dashboard into the
//! application loop; everything the dashboard can resolve locally
//! (cursor moves, overlays, selection changes) stays internal.

use repl_pilot_core::AdminAction;

/// Actions that can be dispatched in the application
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Tick,
    Resize(u16, u16),
    /// Trigger one poll cycle outside the fixed cadence
    Refresh,
    /// Drop the stored credentials; polling short-circuits afterwards
    Logout,
    /// The confirmation overlay was answered for a command
    ResolveCommand(AdminAction, bool),
    /// The confirmation overlay was answered for the pending named test
    ResolveNamedTest(bool),
}
