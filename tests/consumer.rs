//! Consumer loop over in-memory JSON lines.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use amqp_action_router::config::{load_config, RouteConfig, RouterConfig};
use amqp_action_router::consumer::{ConsumeStats, Consumer, Delivery, ReportingLocator};
use amqp_action_router::lifecycle::{register_routes, Shutdown};
use amqp_action_router::routing::Router;

mod common;

const TABLE: &str = r#"
[observability]
log_level = "warn"

[[routes]]
action = "patient.create"
handler = "PatientController.create"

[[routes]]
action = "patient.update"
handler = "PatientController.update"
"#;

fn consumer_from_table() -> Consumer<String> {
    let file = common::write_table(TABLE);
    let config = load_config(file.path()).unwrap();

    let mut router: Router<Delivery, String> = Router::with_locator(ReportingLocator);
    assert_eq!(register_routes(&mut router, &config).unwrap(), 2);
    Consumer::new(router)
}

#[tokio::test]
async fn test_consume_until_eof() {
    let input = concat!(
        r#"{"properties":{"headers":{"action":"patient.create"}},"content":{"name":"Ada"}}"#,
        "\n",
        "\n",
        r#"{"properties":{"headers":{"action":"patient.delete"}}}"#,
        "\n",
        "{oops\n",
        r#"{"properties":{"headers":{"action":"patient.update"}}}"#,
        "\n",
    );

    let shutdown = Shutdown::new();
    let (_reload_tx, reloads) = mpsc::unbounded_channel();
    let mut outputs = Vec::new();

    let mut consumer = consumer_from_table();
    let stats = consumer
        .run(input.as_bytes(), shutdown.subscribe(), reloads, |delivery, out| {
            outputs.push((delivery.tag, out))
        })
        .await
        .unwrap();

    assert_eq!(
        outputs,
        vec![
            (1, "PatientController.create".to_string()),
            (3, "PatientController.update".to_string()),
        ]
    );
    assert_eq!(
        stats,
        ConsumeStats {
            dispatched: 2,
            rejected: 1,
            malformed: 1,
            reloads: 0,
        }
    );
}

#[tokio::test]
async fn test_consume_stops_on_shutdown() {
    // Never yields a line, so only shutdown can end the run
    let (_writer, reader) = tokio::io::duplex(64);
    let reader = tokio::io::BufReader::new(reader);

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let (_reload_tx, reloads) = mpsc::unbounded_channel();

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.trigger();
    });

    let mut consumer = consumer_from_table();
    let stats = tokio::time::timeout(
        Duration::from_secs(5),
        consumer.run(reader, rx, reloads, |_, _| {}),
    )
    .await
    .expect("consumer did not stop")
    .unwrap();

    assert_eq!(stats, ConsumeStats::default());
}

#[tokio::test]
async fn test_reload_applies_between_messages() {
    let shutdown = Shutdown::new();
    let (reload_tx, reloads) = mpsc::unbounded_channel();

    let mut config = RouterConfig::default();
    config
        .routes
        .push(RouteConfig::new("invoice.pay", "InvoiceController.pay"));
    reload_tx.send(config).unwrap();

    // The queued reload is picked up before the first line is read
    let input = concat!(
        r#"{"properties":{"headers":{"action":"patient.create"}}}"#,
        "\n",
        r#"{"properties":{"headers":{"action":"invoice.pay"}}}"#,
        "\n",
    );

    let mut outputs = Vec::new();
    let mut consumer = consumer_from_table();
    let stats = consumer
        .run(input.as_bytes(), shutdown.subscribe(), reloads, |_, out| {
            outputs.push(out)
        })
        .await
        .unwrap();

    assert_eq!(outputs, vec!["InvoiceController.pay".to_string()]);
    assert_eq!(stats.reloads, 1);
    assert_eq!(stats.rejected, 1);
    assert_eq!(consumer.router().len(), 1);
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_finish_event_reports_every_counter() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let shutdown = Shutdown::new();
    let (reload_tx, reloads) = mpsc::unbounded_channel();
    reload_tx.send(RouterConfig::default()).unwrap();

    let mut consumer = consumer_from_table();
    let stats = consumer
        .run(&b""[..], shutdown.subscribe(), reloads, |_, _| {})
        .await
        .unwrap();
    assert_eq!(stats.reloads, 1);

    let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    let finished = logs
        .lines()
        .find(|line| line.contains("Consumer finished"))
        .expect("no finish event");
    for field in ["dispatched=0", "rejected=0", "malformed=0", "reloads=1"] {
        assert!(finished.contains(field), "{} missing from {}", field, finished);
    }
}
