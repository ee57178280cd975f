//! Routing error definitions.

use thiserror::Error;

/// Errors raised while registering or resolving routes.
///
/// Errors produced by handler code are never wrapped here: an inline
/// handler's output (including any `Result` it carries) is returned to the
/// caller of `resolve` untouched.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The route pattern is not a usable action string.
    #[error("Cannot instantiate a route without a valid action path.")]
    InvalidRoute,

    /// The handler is neither a callback nor a handler reference string.
    #[error("Cannot instantiate route without route handler.")]
    InvalidHandler,

    /// The message headers carry no `action` key.
    #[error("Action key in header is required.")]
    MissingAction,

    /// The `action` header is present but is not a string.
    #[error("Action key in header must be a string.")]
    InvalidActionType,

    /// No registered pattern equals the action.
    #[error("Route: {0} doesn't match.")]
    RouteNotFound(String),

    /// A named handler could not be located or invoked.
    #[error(transparent)]
    Locate(#[from] LocateError),
}

/// Errors raised while resolving a named handler reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    /// The locator knows no handler type with this name.
    #[error("Handler not found: {0}")]
    HandlerNotFound(String),

    /// The handler type exposes no action with this name.
    #[error("Handler {handler} has no action {action}")]
    ActionNotFound { handler: String, action: String },

    /// The reference has no action segment after the handler name.
    #[error("Malformed handler reference: {0}")]
    MalformedReference(String),
}

/// Result type for routing operations.
pub type RouterResult<T> = Result<T, RouterError>;
