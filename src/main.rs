use anyhow::Context;
use clap::Parser;
use cohortflow::dataset::survey::{survey_dataset, survey_palette};
use cohortflow::dataset::{Dataset, DatasetConfig};
use cohortflow::http::{AppState, HttpServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Serve the migration survey flow API
#[derive(Parser)]
#[command(name = "cohortflow", version)]
struct Args {
    /// Port for the HTTP API
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Dataset JSON overriding the embedded survey table
    #[arg(long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let dataset = match &args.dataset {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: DatasetConfig =
                serde_json::from_str(&raw).context("parsing dataset JSON")?;
            Dataset::from_config(config).context("validating dataset")?
        }
        None => survey_dataset().clone(),
    };

    let mut palette = survey_palette();
    palette.fill_missing_cohorts(&dataset);
    palette.validate(&dataset).context("validating palette")?;

    info!(
        cohorts = dataset.cohort_count(),
        people = dataset.total_people(),
        "dataset loaded"
    );

    let state = Arc::new(AppState { dataset, palette });
    HttpServer::new(state, args.port)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))?;

    Ok(())
}
