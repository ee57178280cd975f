//! Startup orchestration.
//!
//! # Responsibilities
//! - Register the route table into a router, in file order
//! - Warn about routes shadowed by an earlier duplicate
//!
//! # Design Decisions
//! - Fail fast: the first route the router rejects aborts registration
//! - Registration completes before any message is consumed

use std::collections::HashSet;

use crate::config::RouterConfig;
use crate::routing::{Router, RouterResult};

/// Register every route of `config`. Returns the number registered.
pub fn register_routes<Ch, Out>(
    router: &mut Router<Ch, Out>,
    config: &RouterConfig,
) -> RouterResult<usize> {
    let mut seen = HashSet::new();

    for route in &config.routes {
        let (action, handler) = route.definition()?;
        if !seen.insert(action) {
            tracing::warn!(
                action = %action,
                handler = %handler,
                "Duplicate route is unreachable; first registration wins"
            );
        }
        router.add(action, handler)?;
    }

    tracing::info!(routes = config.routes.len(), "Routes registered");
    Ok(config.routes.len())
}
