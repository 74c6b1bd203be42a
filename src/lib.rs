//! Pulsechat - Chat assistant engine for the Pulseboard demo dashboard
//!
//! This library provides the core functionality for the Pulseboard chat
//! assistant, including session management, intent routing, attachment
//! staging, simulated latency, and send orchestration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Chat sessions, messages, and the session store
//! - `router`: Ordered keyword routing to domain handlers
//! - `collaborators`: Contracts for the backing analytics services
//! - `orchestrator`: The full send flow with its single-flight gate
//! - `attachments`: Attachment validation and staging
//! - `latency`: Simulated thinking time
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use pulsechat::{Collaborators, Config, SendOrchestrator, SessionStore};
//! use std::sync::{Arc, Mutex};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     config.validate()?;
//!
//!     let store = Arc::new(Mutex::new(SessionStore::new()));
//!     let orchestrator = SendOrchestrator::new(store, Collaborators::demo(), &config);
//!     let outcome = orchestrator.send("what's my revenue?").await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod attachments;
pub mod cli;
pub mod collaborators;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod latency;
pub mod orchestrator;
pub mod router;
pub mod session;

// Re-export commonly used types
pub use attachments::AttachmentPipeline;
pub use collaborators::Collaborators;
pub use config::Config;
pub use dashboard::DashboardData;
pub use error::{PulsechatError, Result};
pub use latency::LatencySimulator;
pub use orchestrator::{SendOrchestrator, SendOutcome};
pub use router::IntentRouter;
pub use session::{ChatMessage, ChatSession, SessionStore};
