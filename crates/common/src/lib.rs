//! Common utilities and shared types for fanvault.
//!
//! This crate provides foundational components used across all fanvault crates:
//!
//! - **Configuration**: Session settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: Monotonic numeric ids via [`IdSequence`]
//! - **Metrics**: Per-session counters via [`SessionMetrics`]
//! - **Formatting**: Cent-based [`Price`] and compact profile statistics
//!
//! # Example
//!
//! ```no_run
//! use fanvault_common::{AppResult, Config, IdSequence};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let mut ids = IdSequence::new();
//!     println!("viewer {} gets id {}", config.session.current_user_id, ids.next_id());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod id;
pub mod metrics;

pub use config::{Config, LogFormat, PinScope};
pub use error::{AppError, AppResult};
pub use format::{Price, format_stat};
pub use id::IdSequence;
pub use metrics::{MetricsSnapshot, SessionMetrics};
