//! replman-rs: Rust client for the replication-manager HTTP API
//!
//! This crate provides a high-level client for polling the state of managed
//! database clusters and firing one-way administrative commands.
//!
//! # Example
//!
//! ```no_run
//! use replman_rs::{AuthSession, ReplmanClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = AuthSession::with_basic("admin", "repman");
//!     let client = ReplmanClient::new("http://localhost:10001", auth)?;
//!
//!     let monitor = client.monitor().await?;
//!     for cluster in monitor.clusters {
//!         println!("{}", cluster);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;

pub use auth::{AuthHeaders, AuthSession};
pub use client::{
    Agent,
    Alert,
    Alerts,
    ClusterSummary,
    GtidRecord,
    LogBuffer,
    LogLine,
    Monitor,
    Proxy,
    ReplmanClient,
    ServerStatus,
};
pub use config::ConsoleConfig;
pub use error::ReplmanError;
