//! Message-action router for message-queue consumers.
//!
//! An inbound message carries an action in `properties.headers.action`;
//! the [`Router`] selects the first route registered for that action and
//! invokes its handler, either an inline callback or a named
//! `"<HandlerName>.<actionName>"` reference resolved through a
//! [`HandlerLocator`](routing::HandlerLocator).

pub mod config;
pub mod consumer;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use lifecycle::Shutdown;
pub use routing::{Handler, Message, RouteEntry, Router, RouterError};
