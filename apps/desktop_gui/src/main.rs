use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{load_settings, PlateRecognizer, RecognitionClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime::RepaintNotifier};
use controller::events::UiEvent;
use ui::{PlateScannerApp, StartupConfig};

const APP_TITLE: &str = "License Plate Recognition System";

/// Desktop license plate scanner.
#[derive(Parser, Debug)]
#[command(name = "desktop_gui", version)]
struct Args {
    /// Recognition service base URL; overrides plate_scan.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Longest side of the local preview, in pixels.
    #[arg(long)]
    preview_max_dimension: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(dimension) = args.preview_max_dimension {
        if dimension == 0 {
            bail!("--preview-max-dimension must be greater than zero");
        }
        settings.preview_max_dimension = dimension;
    }

    let client = RecognitionClient::from_settings(&settings)
        .context("invalid recognition service configuration")?;
    tracing::info!(endpoint = %client.endpoint(), "recognition service configured");
    let recognizer: Arc<dyn PlateRecognizer> = Arc::new(client);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let startup = StartupConfig::from(&settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([480.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let notify: RepaintNotifier = Arc::new(move || ctx.request_repaint());
            backend_bridge::runtime::launch(recognizer, cmd_rx, ui_tx, notify);
            Ok(Box::new(PlateScannerApp::new(startup, cmd_tx, ui_rx)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop GUI exited with an error: {err}"))
}
