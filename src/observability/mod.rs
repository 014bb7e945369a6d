//! Observability subsystem for rosterdb
//!
//! Structured JSON logging only. Logging is synchronous, read-only with
//! respect to the roster, and never affects request outcomes.
//!
//! # Usage
//!
//! ```ignore
//! use rosterdb::observability::Logger;
//!
//! Logger::info("SERVER_STARTED", &[("addr", "0.0.0.0:8000")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
