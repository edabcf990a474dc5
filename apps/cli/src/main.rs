use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, ImageUpload, PlateRecognizer, RecognitionClient, RecognitionError,
};
use shared::messages::SUBMISSION_FAILED;
use tracing_subscriber::EnvFilter;

mod summary;

/// Submit one license plate image to the recognition service.
#[derive(Parser, Debug)]
#[command(name = "plate-scan", version)]
struct Args {
    /// Image file to submit.
    image: PathBuf,
    /// Recognition service base URL; overrides plate_scan.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Client-side request timeout in seconds (0 disables it).
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print the raw JSON payload instead of a summary.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = (secs > 0).then_some(secs);
    }

    let upload = ImageUpload::from_path(&args.image)
        .with_context(|| format!("failed to read '{}'", args.image.display()))?;
    if !upload.is_image() {
        bail!(
            "'{}' is not an image file (detected {})",
            args.image.display(),
            upload.mime_type()
        );
    }

    let client = RecognitionClient::from_settings(&settings)
        .context("invalid recognition service configuration")?;

    let result = client
        .recognize(upload)
        .await
        .map_err(|err| submission_failed(&err))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(result.as_value())?);
    } else {
        print!("{}", summary::render_summary(&result));
    }
    Ok(())
}

/// Logs the cause; the user only sees the generic message.
fn submission_failed(err: &RecognitionError) -> anyhow::Error {
    tracing::error!(kind = err.kind().as_str(), "error uploading image: {err}");
    anyhow::anyhow!(SUBMISSION_FAILED)
}
