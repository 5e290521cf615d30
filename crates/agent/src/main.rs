//! `conflog-agent` -- page-side error capture bridge.
//!
//! Reads newline-delimited JSON fault events (`{"type":"error",...}` or
//! `{"type":"unhandledrejection",...}`) from stdin, as forwarded by a page
//! harness, and pushes the ones worth reporting to the conflog server at a
//! paced rate. On end of input it waits for the queue to drain.
//!
//! # Environment variables
//!
//! | Variable                    | Required | Default    | Description                        |
//! |-----------------------------|----------|------------|------------------------------------|
//! | `CONFLOG_SERVER_URL`        | yes      | --         | Server root, e.g. `http://host:3000` |
//! | `CONFLOG_PAGE_HOOK`         | no       | `frontend` | Page hook label                    |
//! | `CONFLOG_PAGE_URL`          | no       | server URL | Page URL attached to each report   |
//! | `CONFLOG_IS_ADMIN`          | no       | `false`    | Whether the page is an admin page  |
//! | `CONFLOG_PACING_MS`         | no       | `1000`     | Milliseconds between deliveries    |
//! | `CONFLOG_HTTP_TIMEOUT_SECS` | no       | `10`       | HTTP request timeout               |

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conflog_agent::bootstrap::fetch_page_context;
use conflog_agent::capture::{CaptureEvent, ErrorCapture};
use conflog_agent::config::AgentConfig;
use conflog_agent::pump::DeliveryPump;
use conflog_agent::transport::{build_client, HttpTransport};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conflog_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AgentConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid agent configuration");
        std::process::exit(1);
    });

    tracing::info!(
        server_url = %config.server_url,
        page_hook = %config.page_hook,
        pacing = ?config.pacing,
        "Starting conflog-agent",
    );

    let client = build_client(config.http_timeout).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    let page = fetch_page_context(&client, &config)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to fetch page context");
            std::process::exit(1);
        });

    let transport = HttpTransport::new(client, &config.server_url, page, config.page_url.clone());
    let capture = ErrorCapture::new(DeliveryPump::with_pacing(transport, config.pacing));
    capture.install();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<CaptureEvent>(&line) {
                    Ok(event) => {
                        let queued = capture.dispatch(event).await;
                        tracing::debug!(queued, "Capture event handled");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, raw = %line, "Malformed capture event skipped");
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read capture events");
                break;
            }
        }
    }

    let pending = capture.pump().pending().await;
    tracing::info!(pending, "Input closed, waiting for queue to drain");
    capture.pump().wait_idle().await;
    tracing::info!("conflog-agent finished");
}
