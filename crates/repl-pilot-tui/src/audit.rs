//! Audit logging for dispatched commands
//!
//! Commands are fire-and-forget, so this append-only log is the one durable
//! record of what the operator asked the backend to do and whether the
//! request left the console successfully.

use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// Timestamp of the event
    pub timestamp: DateTime<Local>,
    /// User who issued the command (from environment)
    pub user: String,
    /// Cluster the command targeted
    pub cluster: String,
    /// Operation name
    pub operation: String,
    /// Target (server id, setting name, test name, or "cluster")
    pub target: String,
    /// Result of the dispatch attempt
    pub result: AuditResult,
    /// Additional details
    pub details: String,
}

/// Result of a dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuditResult {
    /// The one-way request was sent and acknowledged
    Sent,
    /// The request could not be sent or was rejected
    Failed,
}

impl AuditResult {
    fn as_str(&self) -> &'static str {
        match self {
            AuditResult::Sent => "SENT",
            AuditResult::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for AuditResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit logger for dispatched commands
pub struct AuditLogger {
    /// Path to the audit log file
    log_path: PathBuf,
    /// Current user
    user: String,
    /// Whether logging is enabled
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    ///
    /// Creates the ~/.repl-pilot directory if it doesn't exist.
    pub fn new() -> Self {
        let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let pilot_dir = home.join(".repl-pilot");
        let log_path = pilot_dir.join("audit.log");

        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());

        let enabled = fs::create_dir_all(&pilot_dir).is_ok();

        Self {
            log_path,
            user,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_path(&self) -> &PathBuf {
        &self.log_path
    }

    /// Log a dispatch outcome
    pub fn log(
        &self,
        cluster: &str,
        operation: &str,
        target: &str,
        result: AuditResult,
        details: &str,
    ) {
        if !self.enabled {
            return;
        }

        let entry = AuditEntry {
            timestamp: Local::now(),
            user: self.user.clone(),
            cluster: cluster.to_string(),
            operation: operation.to_string(),
            target: target.to_string(),
            result,
            details: details.to_string(),
        };

        if let Err(e) = self.write_entry(&entry) {
            tracing::warn!("Failed to write audit log: {}", e);
        }
    }

    /// Write an entry to the audit log file
    fn write_entry(&self, entry: &AuditEntry) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        // Format: [timestamp] [cluster] [user] [operation] [target] [result] details
        let line = format!(
            "[{}] [{}] [{}] [{}] [{}] [{}] {}\n",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.cluster,
            entry.user,
            entry.operation,
            entry.target,
            entry.result,
            entry.details
        );

        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Read recent audit entries (last N lines)
    pub fn read_recent(&self, count: usize) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }

        match fs::read_to_string(&self.log_path) {
            Ok(content) => content
                .lines()
                .rev()
                .take(count)
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Global audit logger instance
static AUDIT_LOGGER: std::sync::OnceLock<std::sync::Mutex<AuditLogger>> =
    std::sync::OnceLock::new();

/// Initialize the global audit logger
pub fn init_audit_logger() {
    let _ = AUDIT_LOGGER.set(std::sync::Mutex::new(AuditLogger::new()));
}

fn audit_logger() -> Option<std::sync::MutexGuard<'static, AuditLogger>> {
    AUDIT_LOGGER.get().and_then(|l| l.lock().ok())
}

/// Log a sent command (convenience function)
pub fn audit_sent(cluster: &str, operation: &str, target: &str, details: &str) {
    if let Some(logger) = audit_logger() {
        logger.log(cluster, operation, target, AuditResult::Sent, details);
    }
}

/// Log a failed command (convenience function)
pub fn audit_failed(cluster: &str, operation: &str, target: &str, details: &str) {
    if let Some(logger) = audit_logger() {
        logger.log(cluster, operation, target, AuditResult::Failed, details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_result_display() {
        assert_eq!(AuditResult::Sent.to_string(), "SENT");
        assert_eq!(AuditResult::Failed.to_string(), "FAILED");
    }
}
