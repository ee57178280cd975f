//! Route handler variants.
//!
//! A route dispatches either to a callback registered inline, or to a named
//! handler reference of the form `"<HandlerName>.<actionName>"` that is
//! resolved through a [`HandlerLocator`](crate::routing::locator::HandlerLocator)
//! at dispatch time.

use std::fmt;
use std::sync::Arc;

use crate::routing::message::Message;

/// Callback invoked with the message and channel.
pub type InlineHandler<Ch, Out> = Arc<dyn Fn(&Message, &Ch) -> Out + Send + Sync>;

/// The handler bound to a route.
pub enum Handler<Ch, Out> {
    /// Invoked directly with `(message, channel)`.
    Inline(InlineHandler<Ch, Out>),
    /// Resolved by name and invoked with the matched route entry.
    Named(NamedHandler),
}

impl<Ch, Out> Handler<Ch, Out> {
    /// Wrap a callback.
    pub fn inline<F>(callback: F) -> Self
    where
        F: Fn(&Message, &Ch) -> Out + Send + Sync + 'static,
    {
        Handler::Inline(Arc::new(callback))
    }

    /// Wrap a handler reference.
    pub fn named(reference: impl Into<String>) -> Self {
        Handler::Named(NamedHandler::new(reference))
    }

    /// Returns the reference string for named handlers.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Handler::Inline(_) => None,
            Handler::Named(named) => Some(named.as_str()),
        }
    }
}

impl<Ch, Out> Clone for Handler<Ch, Out> {
    fn clone(&self) -> Self {
        match self {
            Handler::Inline(callback) => Handler::Inline(Arc::clone(callback)),
            Handler::Named(named) => Handler::Named(named.clone()),
        }
    }
}

impl<Ch, Out> fmt::Debug for Handler<Ch, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Inline(_) => f.write_str("Inline(<callback>)"),
            Handler::Named(named) => f.debug_tuple("Named").field(&named.as_str()).finish(),
        }
    }
}

impl<Ch, Out> From<&str> for Handler<Ch, Out> {
    fn from(reference: &str) -> Self {
        Handler::named(reference)
    }
}

impl<Ch, Out> From<String> for Handler<Ch, Out> {
    fn from(reference: String) -> Self {
        Handler::named(reference)
    }
}

impl<Ch, Out> From<NamedHandler> for Handler<Ch, Out> {
    fn from(named: NamedHandler) -> Self {
        Handler::Named(named)
    }
}

/// A `"<HandlerName>.<actionName>"` reference.
///
/// The reference is stored verbatim; its structure is only interpreted at
/// dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedHandler {
    reference: String,
}

impl NamedHandler {
    /// Wrap a reference without interpreting it.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// The reference exactly as registered.
    pub fn as_str(&self) -> &str {
        &self.reference
    }

    /// Text before the first `.` (the whole reference when there is none).
    pub fn name(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// Text between the first and second `.`.
    ///
    /// Anything after a second `.` is discarded: `"A.b.c"` yields `"b"`.
    /// This mirrors the handler lookup convention existing route tables
    /// rely on, and is likely not what an author of such a reference meant.
    pub fn action(&self) -> Option<&str> {
        self.segments().nth(1)
    }

    fn segments(&self) -> std::str::Split<'_, char> {
        self.reference.split('.')
    }
}

impl fmt::Display for NamedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}
