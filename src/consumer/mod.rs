//! Line-delimited JSON consumer.
//!
//! Stands in for a broker transport: each input line is one serialized
//! [`Message`], and each message gets a [`Delivery`] as its channel value.
//!
//! # Data Flow
//! ```text
//! reader (JSON lines)
//!     → serde_json (line → Message)     malformed → counted, skipped
//!     → Router::resolve(message, delivery)
//!         Ok(out) → on_output(delivery, out)
//!         Err(e)  → counted as rejected, logged
//!
//! reload channel
//!     → clear router → register new table (between messages)
//! ```
//!
//! # Design Decisions
//! - The router is owned by the consumer task; no locks
//! - Shutdown is checked before every line; an in-flight dispatch completes
//! - What a rejection means (nack, dead-letter) is not decided here

pub mod report;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{broadcast, mpsc};

use crate::config::RouterConfig;
use crate::lifecycle::register_routes;
use crate::routing::{Message, Router, RouterResult};

pub use report::ReportingLocator;

/// Channel value handed to handlers for one consumed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Delivery {
    /// Sequence number of the message, starting at 1.
    pub tag: u64,
}

/// Counters for one consumer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsumeStats {
    pub dispatched: u64,
    pub rejected: u64,
    pub malformed: u64,
    pub reloads: u64,
}

/// Drives a router from a stream of JSON lines.
pub struct Consumer<Out> {
    router: Router<Delivery, Out>,
    next_tag: u64,
    stats: ConsumeStats,
}

impl<Out> Consumer<Out> {
    pub fn new(router: Router<Delivery, Out>) -> Self {
        Self {
            router,
            next_tag: 0,
            stats: ConsumeStats::default(),
        }
    }

    pub fn router(&self) -> &Router<Delivery, Out> {
        &self.router
    }

    pub fn stats(&self) -> ConsumeStats {
        self.stats
    }

    /// Decode and dispatch one line. Returns the handler output on success.
    pub fn dispatch_line(&mut self, line: &str) -> Option<(Delivery, Out)> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let message: Message = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                self.stats.malformed += 1;
                tracing::warn!(error = %e, "Discarding malformed message");
                return None;
            }
        };

        self.next_tag += 1;
        let delivery = Delivery { tag: self.next_tag };

        match self.router.resolve(message, delivery) {
            Ok(out) => {
                self.stats.dispatched += 1;
                Some((delivery, out))
            }
            Err(e) => {
                self.stats.rejected += 1;
                tracing::warn!(tag = delivery.tag, error = %e, "Rejecting message");
                None
            }
        }
    }

    /// Replace the registered routes with those of `config`.
    ///
    /// Every route is checked before the current table is touched, so a
    /// rejected table leaves the previous routes in place.
    pub fn reload(&mut self, config: &RouterConfig) -> RouterResult<usize> {
        for route in &config.routes {
            route.definition()?;
        }

        self.router.clear();
        let count = register_routes(&mut self.router, config)?;
        self.stats.reloads += 1;
        Ok(count)
    }

    /// Consume `reader` until EOF or shutdown.
    ///
    /// Route tables received on `reloads` are applied between messages. A
    /// closed reload or shutdown channel simply disables that input.
    pub async fn run<R, F>(
        &mut self,
        reader: R,
        mut shutdown: broadcast::Receiver<()>,
        mut reloads: mpsc::UnboundedReceiver<RouterConfig>,
        mut on_output: F,
    ) -> std::io::Result<ConsumeStats>
    where
        R: AsyncBufRead + Unpin,
        F: FnMut(Delivery, Out),
    {
        let mut lines = reader.lines();

        loop {
            tokio::select! {
                biased;

                Ok(()) = shutdown.recv() => {
                    tracing::info!("Consumer stopping on shutdown");
                    break;
                }

                Some(config) = reloads.recv() => {
                    match self.reload(&config) {
                        Ok(count) => tracing::info!(routes = count, "Route table reloaded"),
                        Err(e) => tracing::error!(error = %e, "Route table reload failed"),
                    }
                }

                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if let Some((delivery, out)) = self.dispatch_line(&line) {
                                on_output(delivery, out);
                            }
                        }
                        None => {
                            tracing::debug!("Input closed");
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!(
            dispatched = self.stats.dispatched,
            rejected = self.stats.rejected,
            malformed = self.stats.malformed,
            reloads = self.stats.reloads,
            "Consumer finished"
        );
        Ok(self.stats)
    }
}
