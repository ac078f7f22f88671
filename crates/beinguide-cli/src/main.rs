//! beinguide - beIN program guide to XMLTV.

/// Run configuration.
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use beinguide_api::bein::BeinClient;
use beinguide_epg::{LocalScheduleSource, collect_guide, write_guide};
use chrono::Local;
use clap::Parser;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{DEFAULT_DAYS, GuideConfig};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "beinguide", about, version)]
struct Cli {
    /// Relative or absolute path to output the XMLTV file.
    output: PathBuf,

    /// Number of days to grab starting from today.
    #[arg(default_value_t = DEFAULT_DAYS)]
    days: u32,
}

/// Collects the guide from `source` and writes it to the configured path.
///
/// # Errors
///
/// Returns an error if fetching, time range parsing or the file write fails.
#[instrument(skip_all)]
async fn run_with_source(source: &impl LocalScheduleSource, config: &GuideConfig) -> Result<()> {
    tracing::info!(
        "Fetching {} day(s) starting {}",
        config.days,
        config.start_date.format("%Y-%m-%d"),
    );

    let guide = collect_guide(source, config.start_date, config.days).await?;
    write_guide(&guide, &config.names, &config.output_path)?;

    tracing::info!(
        "Done: {} channels, {} programs",
        guide.len(),
        guide.program_count()
    );

    Ok(())
}

/// Runs one scrape against the beIN site.
///
/// # Errors
///
/// Returns an error if the client fails to build or the run fails.
#[instrument(skip_all)]
async fn run(config: &GuideConfig) -> Result<()> {
    let client = BeinClient::builder()
        .user_agent(&config.user_agent)
        .build()
        .context("failed to build EPG client")?;

    run_with_source(&client, config).await
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if the run fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let config = GuideConfig::new(cli.output, cli.days, Local::now().date_naive());
    run(&config).await
}
