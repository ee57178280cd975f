//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load route table → Validate → Register routes → Start consuming
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop reading messages → Exit
//!
//! Signals (signals.rs):
//!     SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: routes are registered before the first message
//! - A message already being dispatched completes before shutdown

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::register_routes;
