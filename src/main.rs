//! amqp-router (v1)
//!
//! Inspection and dry-run tool for action route tables.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes.toml ──▶ config ──▶ lifecycle::startup ──┐
//!        │                                          ▼
//!        └─(--watch)─▶ watcher ──── reload ────▶ routing::Router
//!                                                   ▲   │
//!   stdin (JSON lines) ──▶ consumer ── resolve ─────┘   │
//!                                                       ▼
//!   stdout ◀──────────── handler target ◀──── ReportingLocator
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tokio::sync::mpsc;

use amqp_action_router::config::{load_config, ConfigWatcher, RouterConfig};
use amqp_action_router::consumer::{Consumer, Delivery, ReportingLocator};
use amqp_action_router::lifecycle::{register_routes, signals, Shutdown};
use amqp_action_router::observability::init_logging;
use amqp_action_router::routing::{Message, Router};

#[derive(Parser)]
#[command(name = "amqp-router")]
#[command(about = "Inspect and dry-run message action route tables", long_about = None)]
struct Cli {
    /// Route table (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table and list its routes
    Check,
    /// Resolve a single JSON message and print its handler target
    Route {
        /// Message envelope, e.g. {"properties":{"headers":{"action":"a.b"}}}
        #[arg(short, long)]
        message: String,
    },
    /// Resolve JSON-lines messages from stdin until EOF or Ctrl-C
    Consume {
        /// Reload routes when the table changes on disk
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability)?;

    tracing::info!(
        path = %cli.config.display(),
        routes = config.routes.len(),
        "Route table loaded"
    );

    let mut router: Router<Delivery, String> = Router::with_locator(ReportingLocator);
    register_routes(&mut router, &config)?;

    match cli.command {
        Commands::Check => print_routes(&config),
        Commands::Route { message } => {
            let message: Message = serde_json::from_str(&message)?;
            let target = router.resolve(message, Delivery { tag: 1 })?;
            println!("{}", target);
        }
        Commands::Consume { watch } => {
            let shutdown = Shutdown::new();
            tokio::spawn(signals::listen_for_shutdown(shutdown.clone()));

            // Keep the watcher alive for the whole run
            let (_watcher, reloads) = if watch {
                let (watcher, reloads) = ConfigWatcher::new(&cli.config);
                (Some(watcher.run()?), reloads)
            } else {
                let (_, reloads) = mpsc::unbounded_channel();
                (None, reloads)
            };

            let mut consumer = Consumer::new(router);
            let stats = consumer
                .run(
                    BufReader::new(tokio::io::stdin()),
                    shutdown.subscribe(),
                    reloads,
                    |delivery, target| {
                        println!(
                            "{}",
                            serde_json::json!({ "tag": delivery.tag, "handler": target })
                        );
                    },
                )
                .await?;

            eprintln!("{}", serde_json::to_string(&stats)?);
        }
    }

    Ok(())
}

fn print_routes(config: &RouterConfig) {
    for (index, route) in config.routes.iter().enumerate() {
        if let Ok((action, handler)) = route.definition() {
            println!("{:>3}  {:<32} {}", index, action, handler);
        }
    }
}
