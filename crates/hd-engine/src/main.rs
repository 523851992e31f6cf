//! hd-diagnose: run one diagnostic against a captured device snapshot.
//!
//! Usage: `hd-diagnose <snapshot.json> [config.toml]`
//!
//! Prints the `DiagnosticReport` as JSON on stdout; logs go to stderr.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hd_engine::{Collaborators, DiagnosticService, EngineConfig, EventWindow, SnapshotFile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "hd-diagnose starting");

    let mut args = std::env::args().skip(1);
    let snapshot_path = args
        .next()
        .context("usage: hd-diagnose <snapshot.json> [config.toml]")?;

    let config = match args.next() {
        Some(path) => EngineConfig::from_file(&path)?,
        None => EngineConfig::from_env(),
    };
    tracing::debug!(?config, "config loaded");

    let snapshot = SnapshotFile::load(&snapshot_path)
        .await
        .with_context(|| format!("loading snapshot {snapshot_path}"))?;

    // A snapshot is already a bounded capture, so the window takes all of it
    // rather than applying the live lookback.
    let window = EventWindow::new(snapshot.device_id.clone(), snapshot.events.clone());

    let service = DiagnosticService::new(Collaborators::from_platform(&snapshot), config);
    let report = service.run_diagnostic(&snapshot.device_id, &window).await;
    tracing::info!(summary = %report.summary(), "report ready");

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
