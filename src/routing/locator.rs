//! Named handler resolution.
//!
//! # Responsibilities
//! - Map a handler name to a fresh handler instance
//! - Invoke an action on that instance with the matched route entry
//!
//! # Design Decisions
//! - The router depends only on [`HandlerLocator`]; hosts supply the lookup
//! - One instance per resolution, no caching
//! - Lookup failures are errors, never a silent fallback

use std::collections::HashMap;
use std::fmt;

use crate::routing::error::LocateError;
use crate::routing::router::RouteEntry;

/// A handler type instance obtained for one resolution.
pub trait HandlerInstance<Ch, Out> {
    /// Invoke the member named `action`, passing the matched route.
    ///
    /// Implementations return [`LocateError::ActionNotFound`] for actions
    /// they do not expose.
    fn invoke(&mut self, action: &str, route: &RouteEntry<Ch, Out>) -> Result<Out, LocateError>;
}

/// Resolves handler names to instances.
pub trait HandlerLocator<Ch, Out>: Send + Sync {
    /// Obtain a fresh instance of the handler type called `name`.
    ///
    /// Unknown names yield [`LocateError::HandlerNotFound`].
    fn locate(&self, name: &str) -> Result<Box<dyn HandlerInstance<Ch, Out>>, LocateError>;
}

type Factory<Ch, Out> = Box<dyn Fn() -> Box<dyn HandlerInstance<Ch, Out>> + Send + Sync>;

/// Locator backed by an explicit name → factory table populated at startup.
pub struct HandlerRegistry<Ch, Out> {
    factories: HashMap<String, Factory<Ch, Out>>,
}

impl<Ch, Out> HandlerRegistry<Ch, Out> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register<F, H>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: HandlerInstance<Ch, Out> + 'static,
        Ch: 'static,
        Out: 'static,
    {
        let factory: Factory<Ch, Out> =
            Box::new(move || -> Box<dyn HandlerInstance<Ch, Out>> { Box::new(factory()) });
        self.factories.insert(name.into(), factory);
        self
    }

    /// Returns true if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered handler names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl<Ch, Out> Default for HandlerRegistry<Ch, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ch, Out> fmt::Debug for HandlerRegistry<Ch, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<Ch, Out> HandlerLocator<Ch, Out> for HandlerRegistry<Ch, Out> {
    fn locate(&self, name: &str) -> Result<Box<dyn HandlerInstance<Ch, Out>>, LocateError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| LocateError::HandlerNotFound(name.to_string()))
    }
}
