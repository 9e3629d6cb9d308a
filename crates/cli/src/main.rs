mod cli;
mod render;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pearl_core::{
    resolve_config, validate_config, FfmpegEncoder, FfplayPlayer, Optimizer, OptimizerEvent,
    TranscodeRequest,
};

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let default_filter = if cli.verbose {
        "warn,pearl_core=debug,pearl_cli=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = resolve_config(cli.config.as_deref()).context("Failed to load config")?;
    cli.apply(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Resolved configuration: {:?}", config);

    let request = TranscodeRequest::new(
        &cli.input,
        cli.output.clone(),
        config.defaults.duration_secs,
        config.defaults.volume,
        config.defaults.bitrate_kbps,
    )?;
    let options = cli.options(&config);

    let optimizer = Optimizer::new(
        FfmpegEncoder::new(config.encoder.clone()),
        FfplayPlayer::new(config.player.clone()),
    )
    .with_progress_callback(Arc::new(|event: &OptimizerEvent| {
        for line in render::render_event(event) {
            println!("{}", line);
        }
    }));

    let outcome = optimizer.run(&request, &options).await?;

    if cli.json {
        match &outcome.report {
            Some(report) => println!("{}", serde_json::to_string_pretty(report)?),
            None => warn!("--json has no report to print when analysis is disabled"),
        }
    }

    if let (Some(path), Some(uri)) = (&cli.emit_uri, &outcome.data_uri) {
        tokio::fs::write(path, uri)
            .await
            .with_context(|| format!("Failed to write data URI to {:?}", path))?;
        debug!("Wrote {} character data URI to {:?}", uri.len(), path);
    }

    Ok(())
}
