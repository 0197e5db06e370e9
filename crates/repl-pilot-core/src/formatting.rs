//! Formatting utilities for consistent display across the console
//!
//! Small pure helpers; the GTID formatter is the canonical display form for
//! replication positions.

use replman_rs::GtidRecord;

/// Render a GTID set as `"domain-server-seq"` triplets joined with `,`.
///
/// Input order is preserved: replication position ordering is semantically
/// meaningful. An absent or empty set renders as the empty string.
///
/// # Examples
///
/// ```
/// use repl_pilot_core::formatting::gtid_string;
/// use replman_rs::GtidRecord;
///
/// let set = [GtidRecord { domain_id: 1, server_id: 2, seq_no: 3 }];
/// assert_eq!(gtid_string(Some(&set)), "1-2-3");
/// assert_eq!(gtid_string(None), "");
/// ```
pub fn gtid_string(records: Option<&[GtidRecord]>) -> String {
    let Some(records) = records else {
        return String::new();
    };

    records
        .iter()
        .map(|g| format!("{}-{}-{}", g.domain_id, g.server_id, g.seq_no))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a replication delay in seconds, `-` when unknown
pub fn format_delay(delay: Option<i64>) -> String {
    match delay {
        Some(secs) => format!("{}s", secs),
        None => "-".to_string(),
    }
}
