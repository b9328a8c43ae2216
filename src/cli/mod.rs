//! Command-line interface: the HTTP server plus one-shot query commands.

use clap::{Parser, Subcommand};

use crate::entities::{event, manufacturer, trend};
use crate::render::json::to_pretty;
use crate::sources::openfda::OpenFdaClient;

pub mod health;

#[derive(Parser, Debug)]
#[command(
    name = "faers-explorer",
    version,
    about = "Drug adverse-event reports from openFDA: raw events, manufacturer counts, monthly trends"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP server (homepage, /events, /manufacturers, /trends)
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },

    /// Print raw adverse-event reports for a drug as returned by openFDA
    Events {
        /// Medicinal product name
        drug: String,

        /// Seriousness code appended as `serious:<value>` (1 = serious, 2 = not serious)
        #[arg(long)]
        serious: Option<String>,
    },

    /// Print per-manufacturer report counts for a drug
    Manufacturers {
        /// Medicinal product name
        drug: String,
    },

    /// Print monthly report counts for a drug
    Trends {
        /// Medicinal product name
        drug: String,
    },

    /// Check upstream API connectivity
    Health {
        /// Base URL of a running server to probe as well (e.g. http://127.0.0.1:5000)
        #[arg(long)]
        server: Option<String>,
    },
}

/// Runs a one-shot command and returns its rendered output.
///
/// # Errors
///
/// Returns an error when the upstream call fails or the command is `serve`,
/// which is dispatched by the binary instead.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    match cli.command {
        Commands::Events { drug, serious } => {
            let client = OpenFdaClient::new()?;
            let body = event::search(&client, &drug, serious.as_deref()).await?;
            Ok(to_pretty(&body)?)
        }
        Commands::Manufacturers { drug } => {
            let client = OpenFdaClient::new()?;
            let response = manufacturer::search(&client, &drug).await?;
            Ok(to_pretty(&response)?)
        }
        Commands::Trends { drug } => {
            let client = OpenFdaClient::new()?;
            let response = trend::search(&client, &drug).await?;
            Ok(to_pretty(&response)?)
        }
        Commands::Health { server } => {
            let report = health::check(server.as_deref()).await?;
            if !report.all_healthy() {
                tracing::warn!(
                    healthy = report.healthy,
                    total = report.total,
                    "Some health checks failed"
                );
            }
            Ok(report.to_markdown())
        }
        Commands::Serve { .. } => Err(anyhow::anyhow!(
            "`serve` runs the HTTP server and is not a one-shot command"
        )),
    }
}
