//! Configuration schema definitions.
//!
//! The route table is a TOML document. Route fields are kept as raw TOML
//! values so that a mistyped entry (`action = 1`) reaches route validation
//! instead of failing as an opaque parse error.

use serde::{Deserialize, Serialize};

use crate::routing::RouterError;

/// Root configuration for the router process.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, in registration order.
    pub routes: Vec<RouteConfig>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// A route binding an action to a named handler reference.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RouteConfig {
    /// Action header value to match.
    pub action: toml::Value,

    /// `"<HandlerName>.<actionName>"` reference.
    pub handler: toml::Value,
}

impl RouteConfig {
    pub fn new(action: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            action: toml::Value::String(action.into()),
            handler: toml::Value::String(handler.into()),
        }
    }

    /// Returns the `(action, handler)` pair once both are typed correctly.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidRoute`] when `action` is not a string
    /// - [`RouterError::InvalidHandler`] when `handler` is not a string
    pub fn definition(&self) -> Result<(&str, &str), RouterError> {
        let action = self.action.as_str().ok_or(RouterError::InvalidRoute)?;
        let handler = self.handler.as_str().ok_or(RouterError::InvalidHandler)?;
        Ok((action, handler))
    }

    /// Handler name of the reference, if the route is well typed.
    pub fn handler_name(&self) -> Option<&str> {
        self.handler.as_str().and_then(|h| h.split('.').next())
    }
}
