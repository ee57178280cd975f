//! Inbound message envelope.
//!
//! # Responsibilities
//! - Mirror the broker metadata envelope (`properties.headers`)
//! - Extract and validate the `action` header before matching
//!
//! # Design Decisions
//! - Header values are untyped JSON so a transport adapter can map any
//!   native field table into this shape
//! - Missing `headers` deserializes as an empty table, which then fails
//!   action validation like any other message without an action

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routing::error::{RouterError, RouterResult};

/// Header key that carries the routing action.
pub const ACTION_HEADER: &str = "action";

/// A message as seen by the router.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Message {
    /// Broker metadata.
    #[serde(default)]
    pub properties: MessageProperties,

    /// Decoded payload. Never interpreted by the router.
    #[serde(default)]
    pub content: Value,
}

/// Message metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MessageProperties {
    /// Application headers.
    #[serde(default)]
    pub headers: HashMap<String, Value>,
}

impl Message {
    /// Create a message with the given headers and an empty payload.
    pub fn new(headers: HashMap<String, Value>) -> Self {
        Self {
            properties: MessageProperties { headers },
            content: Value::Null,
        }
    }

    /// Create a message whose `action` header is set to `action`.
    pub fn with_action(action: impl Into<String>) -> Self {
        Self::default().header(ACTION_HEADER, Value::String(action.into()))
    }

    /// Set a header, replacing any previous value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.headers.insert(key.into(), value.into());
        self
    }

    /// Set the payload.
    pub fn content(mut self, content: impl Into<Value>) -> Self {
        self.content = content.into();
        self
    }

    /// Return the validated `action` header.
    pub fn action(&self) -> RouterResult<&str> {
        match self.properties.headers.get(ACTION_HEADER) {
            None => Err(RouterError::MissingAction),
            Some(Value::String(action)) => Ok(action.as_str()),
            Some(_) => Err(RouterError::InvalidActionType),
        }
    }
}
