//! Shared constants for the repl-pilot engine
//!
//! Wire-level setting names and default cadences shared across crates.

/// Default poll interval in milliseconds
pub const DEFAULT_REFRESH_MS: u64 = 2000;

/// Number of log-buffer lines the dashboard keeps visible
pub const LOG_TAIL_LINES: usize = 200;

// =============================================================================
// Backend setting names
// =============================================================================

/// Setting toggled by the traffic switch command
pub const TRAFFIC_SETTING: &str = "database-hearbeat";

/// Setting carrying the maximum tolerated replica delay
pub const MAX_DELAY_SETTING: &str = "failover-max-slave-delay";
