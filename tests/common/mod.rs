//! Shared utilities for integration tests.

use std::io::Write;
use std::sync::{Arc, Mutex};

use amqp_action_router::routing::{HandlerInstance, LocateError, Message, RouteEntry};

/// Build a message envelope carrying `action`.
pub fn message(action: &str) -> Message {
    Message::with_action(action)
}

/// Write a route table to a temporary file.
#[allow(dead_code)]
pub fn write_table(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// A record of one named handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub instance: usize,
    pub action: String,
    pub pattern: String,
    pub message: Option<Message>,
}

/// Handler type exposing `create` and `update`, logging every call.
#[allow(dead_code)]
pub struct PatientController {
    pub instance: usize,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl<Ch> HandlerInstance<Ch, String> for PatientController {
    fn invoke(&mut self, action: &str, route: &RouteEntry<Ch, String>) -> Result<String, LocateError> {
        match action {
            "create" | "update" => {
                self.calls.lock().unwrap().push(Call {
                    instance: self.instance,
                    action: action.to_string(),
                    pattern: route.pattern().to_string(),
                    message: route.last_message().cloned(),
                });
                Ok(format!("patient {}d", action))
            }
            _ => Err(LocateError::ActionNotFound {
                handler: "PatientController".into(),
                action: action.into(),
            }),
        }
    }
}
