//! Offline seeding utility: bulk-loads the video catalog from a JSON fixture
//! or clears it, depending on the flag given.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use api_videohub::models::{describe_field_errors, validate_create, CreateVideoRequest, NewVideo};
use api_videohub::{Config, VideoStore};

#[derive(Debug, Parser)]
#[command(
    name = "seed",
    about = "Bulk-load the video catalog from a fixture file, or clear it",
    group(ArgGroup::new("mode").required(true).args(["import", "delete"]))
)]
struct Options {
    /// Clear the store, then import every video from the fixture file
    #[arg(short, long)]
    import: bool,

    /// Delete every video from the store
    #[arg(short, long)]
    delete: bool,

    /// Fixture file holding a JSON array of video payloads
    #[arg(long, default_value = "data/sample_videos.json")]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options = Options::parse();

    let config = Config::from_env()?;
    let store = VideoStore::connect(&config.database_url)
        .await
        .context("could not open the video store")?;

    if options.import {
        import_data(&store, &options.file).await
    } else {
        delete_data(&store).await
    }
}

/// Validates the whole fixture before touching the store, so a bad entry
/// never leaves the catalog half-cleared.
async fn import_data(store: &VideoStore, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("could not read fixture file {}", file.display()))?;
    let payloads: Vec<CreateVideoRequest> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of video payloads", file.display()))?;

    let mut videos: Vec<NewVideo> = Vec::with_capacity(payloads.len());
    for (index, payload) in payloads.iter().enumerate() {
        match validate_create(payload) {
            Ok(video) => videos.push(video),
            Err(errors) => bail!(
                "fixture entry {} ('{}') failed validation: {}",
                index,
                payload.title.as_deref().unwrap_or("<untitled>"),
                describe_field_errors(&errors)
            ),
        }
    }

    let removed = store
        .delete_all()
        .await
        .context("could not clear existing videos")?;
    tracing::info!(removed, "existing videos deleted");

    let inserted = store
        .bulk_insert(&videos)
        .await
        .context("could not import sample videos")?;
    tracing::info!(inserted, "sample videos imported successfully");

    Ok(())
}

async fn delete_data(store: &VideoStore) -> Result<()> {
    let removed = store
        .delete_all()
        .await
        .context("could not delete videos")?;
    tracing::info!(removed, "all videos deleted successfully");

    Ok(())
}
