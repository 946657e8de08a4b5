//! Brainwave Fortune - command line entry point
//!
//! ```text
//! brainwave-fortune serve [--addr HOST:PORT]
//! brainwave-fortune encode --headband 3 --run 5
//! brainwave-fortune encode --timestamp 1700000000000
//! brainwave-fortune decode NDV4MTMzMA
//! brainwave-fortune read --headband 3 [--run 5] | --id TOKEN
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use brainwave_fortune::api::{create_app, ApiState};
use brainwave_fortune::client::BrainwaveClient;
use brainwave_fortune::config::FortuneConfig;
use brainwave_fortune::identifier::{decode, encode_data, encode_fortune, PageQuery};
use brainwave_fortune::pipeline::FortunePipeline;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "brainwave-fortune")]
#[command(about = "EEG band readings to fortunes, labels and waveform previews")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the JSON API
    Serve {
        /// Override the server address (default from config: "0.0.0.0:8080")
        #[arg(short, long)]
        addr: Option<String>,
    },

    /// Encode an identifier token
    Encode {
        #[arg(long, requires = "run", conflicts_with = "timestamp")]
        headband: Option<i64>,
        #[arg(long, requires = "headband")]
        run: Option<i64>,
        /// Fortune-mode timestamp in epoch milliseconds
        #[arg(long)]
        timestamp: Option<u64>,
    },

    /// Decode an identifier token
    Decode {
        token: String,
    },

    /// Fetch one reading and print the report as JSON
    Read {
        #[arg(long, conflicts_with_all = ["headband", "run"])]
        id: Option<String>,
        #[arg(long)]
        headband: Option<i64>,
        #[arg(long)]
        run: Option<i64>,
    },
}

// ============================================================================
// Commands
// ============================================================================

async fn serve(config: &FortuneConfig, addr: Option<String>) -> Result<()> {
    let addr = addr.unwrap_or_else(|| config.server.addr.clone());
    let client = BrainwaveClient::from_config(&config.api).context("Failed to build HTTP client")?;
    info!(endpoint = client.endpoint(), "Band API");

    let pipeline = FortunePipeline::new(Arc::new(client), config.clone());
    let app = create_app(ApiState::new(pipeline));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Received Ctrl+C, shutting down");
        })
        .await
        .context("HTTP server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn read(
    config: &FortuneConfig,
    id: Option<String>,
    headband: Option<i64>,
    run: Option<i64>,
) -> Result<()> {
    let client = BrainwaveClient::from_config(&config.api).context("Failed to build HTTP client")?;
    let pipeline = FortunePipeline::new(Arc::new(client), config.clone());

    let query = PageQuery {
        id,
        headband: headband.map(|h| h.to_string()),
        run: run.map(|r| r.to_string()),
        ..PageQuery::default()
    };
    let report = pipeline.report_for_query(&query).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    match args.command {
        SubCommand::Encode { headband, run, timestamp } => {
            let token = match (headband, run, timestamp) {
                (Some(h), Some(r), _) => encode_data(h, r),
                (_, _, Some(ts)) => encode_fortune(ts),
                _ => bail!("pass --headband and --run, or --timestamp"),
            };
            println!("{token}");
            Ok(())
        }
        SubCommand::Decode { token } => {
            let Some(identifier) = decode(&token) else {
                bail!("'{token}' is not a valid identifier");
            };
            println!("{}", serde_json::to_string(&identifier)?);
            Ok(())
        }
        SubCommand::Serve { addr } => serve(&load_config(), addr).await,
        SubCommand::Read { id, headband, run } => read(&load_config(), id, headband, run).await,
    }
}

/// Load the configuration for this run.
fn load_config() -> FortuneConfig {
    let config = FortuneConfig::load();
    info!(
        classifier = ?config.policy.classifier,
        waveform = ?config.policy.waveform,
        "Configuration loaded"
    );
    config
}
