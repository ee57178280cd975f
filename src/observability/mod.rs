//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (registration, dispatch, reloads, rejections)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, text or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured fields (action, route, tag) rather than formatted strings
//! - The router core only emits debug/trace events; deciding what a
//!   rejected message means is left to the consumer

pub mod logging;

pub use logging::init_logging;
