//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     add(pattern, handler)
//!     → validate pattern / handler
//!     → append RouteEntry (registration order preserved)
//!
//! Inbound Message (properties.headers.action, channel)
//!     → message.rs (action present and a string?)
//!     → router.rs (first entry whose pattern == action)
//!     → record (message, channel) on the entry
//!     → Inline: callback(message, channel)
//!       Named:  locator.rs locate(name) → instance.invoke(action, entry)
//!     → handler output returned unmodified
//! ```
//!
//! # Design Decisions
//! - No wildcard or prefix matching
//! - First registered match wins
//! - Handler failures belong to the caller; the router adds no retry,
//!   fallback or isolation

pub mod error;
pub mod handler;
pub mod locator;
pub mod message;
pub mod router;

pub use error::{LocateError, RouterError, RouterResult};
pub use handler::{Handler, InlineHandler, NamedHandler};
pub use locator::{HandlerInstance, HandlerLocator, HandlerRegistry};
pub use message::{Message, MessageProperties, ACTION_HEADER};
pub use router::{RouteEntry, Router};
