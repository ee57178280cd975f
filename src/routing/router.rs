//! Route registry and dispatch.
//!
//! # Responsibilities
//! - Store validated routes in registration order
//! - Validate the inbound message's action before matching
//! - Look up the first route whose pattern equals the action
//! - Dispatch to the inline callback or the located named handler
//!
//! # Design Decisions
//! - Exact, case-sensitive string equality; no wildcards
//! - First registered match wins, duplicates are never reported
//! - O(n) scan (route tables are small and registration order matters)
//! - The handler's output is passed through unmodified and never awaited
//! - `resolve` takes `&mut self` because the matched entry records the
//!   last message and channel it dispatched

use std::fmt;

use crate::routing::error::{LocateError, RouterError, RouterResult};
use crate::routing::handler::Handler;
use crate::routing::locator::{HandlerLocator, HandlerRegistry};
use crate::routing::message::Message;

/// A registered binding from an action pattern to a handler.
pub struct RouteEntry<Ch, Out> {
    pattern: String,
    handler: Handler<Ch, Out>,
    last: Option<(Message, Ch)>,
}

impl<Ch, Out> RouteEntry<Ch, Out> {
    /// The action this entry matches.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The handler this entry dispatches to.
    pub fn handler(&self) -> &Handler<Ch, Out> {
        &self.handler
    }

    /// Message from the most recent resolution of this entry.
    pub fn last_message(&self) -> Option<&Message> {
        self.last.as_ref().map(|(message, _)| message)
    }

    /// Channel from the most recent resolution of this entry.
    pub fn last_channel(&self) -> Option<&Ch> {
        self.last.as_ref().map(|(_, channel)| channel)
    }
}

impl<Ch: fmt::Debug, Out> fmt::Debug for RouteEntry<Ch, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern)
            .field("handler", &self.handler)
            .field("last", &self.last)
            .finish()
    }
}

/// Message-action router.
pub struct Router<Ch, Out> {
    routes: Vec<RouteEntry<Ch, Out>>,
    locator: Box<dyn HandlerLocator<Ch, Out>>,
}

impl<Ch: 'static, Out: 'static> Router<Ch, Out> {
    /// Create an empty router whose named handlers resolve through an
    /// empty [`HandlerRegistry`].
    pub fn new() -> Self {
        Self::with_locator(HandlerRegistry::new())
    }
}

impl<Ch: 'static, Out: 'static> Default for Router<Ch, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ch, Out> Router<Ch, Out> {
    /// Create an empty router using `locator` for named handlers.
    pub fn with_locator(locator: impl HandlerLocator<Ch, Out> + 'static) -> Self {
        Self {
            routes: Vec::new(),
            locator: Box::new(locator),
        }
    }

    /// Replace the named handler locator. Registered routes are kept.
    pub fn set_locator(&mut self, locator: impl HandlerLocator<Ch, Out> + 'static) {
        self.locator = Box::new(locator);
    }

    /// Register a route.
    ///
    /// Any string is a valid pattern, the empty one included. Named handler
    /// references are stored as given; their `"<HandlerName>.<actionName>"`
    /// structure is checked only when the route is dispatched. Mistyped
    /// patterns and handlers can only come from a route table and are
    /// rejected by [`RouteConfig::definition`](crate::config::RouteConfig::definition).
    pub fn add(
        &mut self,
        pattern: impl Into<String>,
        handler: impl Into<Handler<Ch, Out>>,
    ) -> RouterResult<()> {
        let pattern = pattern.into();
        let handler = handler.into();
        tracing::debug!(pattern = %pattern, handler = ?handler, "Route registered");

        self.routes.push(RouteEntry {
            pattern,
            handler,
            last: None,
        });
        Ok(())
    }

    /// Match `message` to a route and invoke its handler.
    ///
    /// Returns whatever the handler returns. Errors raised while locating a
    /// named handler propagate as [`RouterError::Locate`].
    ///
    /// # Errors
    ///
    /// - [`RouterError::MissingAction`] / [`RouterError::InvalidActionType`]
    ///   when the action header is absent or not a string; nothing is
    ///   matched or dispatched in that case
    /// - [`RouterError::RouteNotFound`] when no pattern equals the action
    pub fn resolve(&mut self, message: Message, channel: Ch) -> RouterResult<Out> {
        let action = message.action()?;

        let index = self
            .routes
            .iter()
            .position(|route| route.pattern == action)
            .ok_or_else(|| RouterError::RouteNotFound(action.to_string()))?;

        tracing::trace!(action = %action, route = index, "Route matched");

        let entry = &mut self.routes[index];
        let (message, channel) = entry.last.insert((message, channel));

        match &entry.handler {
            Handler::Inline(callback) => Ok(callback(message, channel)),
            Handler::Named(named) => {
                let mut instance = self.locator.locate(named.name())?;
                let action = named
                    .action()
                    .ok_or_else(|| LocateError::MalformedReference(named.to_string()))?;
                Ok(instance.invoke(action, entry)?)
            }
        }
    }

    /// Remove every route.
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> &[RouteEntry<Ch, Out>] {
        &self.routes
    }

    /// Number of registered routes, duplicates included.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<Ch, Out> fmt::Debug for Router<Ch, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field(
                "routes",
                &self.routes.iter().map(|r| r.pattern.as_str()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
