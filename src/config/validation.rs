//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route is registrable (typed action and handler)
//! - Check the log level is one tracing understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Duplicate actions are accepted: the first registered route wins, and
//!   startup warns about the shadowed ones
//! - Handler references are not checked for a `.` here, matching
//!   registration, which defers that to dispatch

use std::str::FromStr;

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::config::schema::RouterConfig;
use crate::routing::RouterError;

/// A single semantic problem in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A route would be rejected by the router.
    #[error("routes[{index}]: {source}")]
    Route {
        index: usize,
        #[source]
        source: RouterError,
    },

    /// The log level is not recognised.
    #[error("unknown log level: {0}")]
    LogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if LevelFilter::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    for (index, route) in config.routes.iter().enumerate() {
        if let Err(source) = route.definition() {
            errors.push(ValidationError::Route { index, source });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
