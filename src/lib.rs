//! Slotbook - Availability and booking engine for appointment scheduling
//!
//! Weekly schedules with per-day hours, date-range exceptions layered on
//! top, slot generation against a service's duration and conflict-checked
//! booking inside serializable transactions.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Pure scheduling core (schedules, exceptions, slots, conflicts)
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories, transactions)
//! - **api**: HTTP handlers and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Appointment, Business, Exception, WeeklySchedule};
pub use errors::{AppError, AppResult};
