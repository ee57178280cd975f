//! Dry-run named handler resolution.

use crate::routing::{HandlerInstance, HandlerLocator, LocateError, RouteEntry};

/// Locator that resolves every name to an instance reporting its target.
///
/// Used where no application handlers are linked in: the output of a
/// named dispatch is the `"<HandlerName>.<actionName>"` it would reach.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportingLocator;

struct Report {
    name: String,
}

impl<Ch> HandlerInstance<Ch, String> for Report {
    fn invoke(&mut self, action: &str, _route: &RouteEntry<Ch, String>) -> Result<String, LocateError> {
        Ok(format!("{}.{}", self.name, action))
    }
}

impl<Ch> HandlerLocator<Ch, String> for ReportingLocator {
    fn locate(&self, name: &str) -> Result<Box<dyn HandlerInstance<Ch, String>>, LocateError> {
        if name.is_empty() {
            return Err(LocateError::HandlerNotFound(String::new()));
        }
        Ok(Box::new(Report {
            name: name.to_string(),
        }))
    }
}
