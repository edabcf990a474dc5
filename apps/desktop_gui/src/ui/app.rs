//! Root view: owns the workflow state and composes the panels.

use std::path::PathBuf;
use std::time::Duration;

use client_core::ClientSettings;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    acquisition::{acquire_dropped, acquire_picked, Acquired, DroppedItem},
    events::{ScanErrorCategory, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{reduce, Action, AppState, Effect, SelectedFile},
};
use crate::ui::panels::{
    results,
    scanner::{self, ScannerIntent, ScannerView},
};
use crate::ui::preview::{load_preview, PreviewTexture};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_base_url: String,
    pub preview_max_dimension: u32,
}

impl From<&ClientSettings> for StartupConfig {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            api_base_url: settings.api_base_url.clone(),
            preview_max_dimension: settings.preview_max_dimension,
        }
    }
}

pub struct PlateScannerApp {
    state: AppState<PreviewTexture>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    config: StartupConfig,
}

impl PlateScannerApp {
    pub fn new(
        config: StartupConfig,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            state: AppState::default(),
            cmd_tx,
            ui_rx,
            config,
        }
    }

    fn apply(&mut self, action: Action<PreviewTexture>) {
        let before = self.state.phase();
        let effect = reduce(&mut self.state, action);
        let after = self.state.phase();
        if before != after {
            tracing::debug!(?before, ?after, "scan phase changed");
        }
        match effect {
            Effect::None => {}
            Effect::Submit { ticket, upload } => {
                let cmd = BackendCommand::RecognizePlate { ticket, upload };
                if let Err(failure) = dispatch_backend_command(&self.cmd_tx, cmd) {
                    // A command that never reached the worker fails the scan right away.
                    self.apply(Action::SubmitFailure { ticket, failure });
                }
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply(event.into_action());
        }
    }

    /// Applies any drop delivered this frame; returns whether files hover the window.
    fn handle_file_drops(&mut self, ctx: &egui::Context) -> bool {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.iter().map(dropped_item).collect::<Vec<_>>(),
            )
        });
        if !dropped.is_empty() {
            let acquired = acquire_dropped(&dropped);
            self.accept(ctx, acquired, true);
        }
        hovering
    }

    fn pick_file(&mut self, ctx: &egui::Context) {
        let mut dialog = rfd::FileDialog::new().add_filter("Images", &IMAGE_EXTENSIONS);
        if let Some(dir) = default_image_dir() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            let acquired = acquire_picked(&path);
            self.accept(ctx, acquired, false);
        }
    }

    fn accept(&mut self, ctx: &egui::Context, acquired: Acquired, dropped: bool) {
        let action = match acquired {
            Acquired::Ready { upload, source } => {
                let preview = load_preview(ctx, &upload, self.config.preview_max_dimension);
                let selected = SelectedFile::new(upload, preview, source);
                if dropped {
                    Action::DropValid(selected)
                } else {
                    Action::Select(selected)
                }
            }
            Acquired::NotAnImage => Action::DropInvalid,
            Acquired::Unreadable { path, reason } => Action::SelectionUnreadable { path, reason },
        };
        self.apply(action);
    }

    fn show_workflow(&self, ui: &mut egui::Ui, drop_hover: bool) -> Option<ScannerIntent> {
        let workflow = self.state.workflow();

        ui.vertical_centered(|ui| {
            ui.heading("License Plate Recognition System");
            ui.weak("Upload and analyze vehicle license plates");
        });
        ui.add_space(12.0);

        let view = ScannerView {
            preview: self.state.selection().map(SelectedFile::preview),
            upload: self.state.selection().map(SelectedFile::upload),
            file_input: self.state.file_input().map(PathBuf::as_path),
            can_submit: self.state.can_submit(),
            drop_hover,
            drop_rejected: workflow.error.as_ref().map(|err| err.category())
                == Some(ScanErrorCategory::InvalidDrop),
        };
        let intent = card(ui, |ui| scanner::show(ui, &view));

        if workflow.is_loading {
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Processing image...");
            });
        }

        if let Some(message) = workflow.error_message() {
            ui.add_space(10.0);
            error_panel(ui, message);
        }

        if let Some(result) = workflow.visible_result() {
            ui.add_space(10.0);
            card(ui, |ui| results::show(ui, result));
        }

        ui.add_space(8.0);
        ui.small(egui::RichText::new(format!("Service: {}", self.config.api_base_url)).weak());

        intent
    }
}

impl eframe::App for PlateScannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let drop_hover = self.handle_file_drops(ctx);

        let intent = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.show_workflow(ui, drop_hover))
                    .inner
            })
            .inner;

        match intent {
            Some(ScannerIntent::PickFile) => self.pick_file(ctx),
            Some(ScannerIntent::Submit) => self.apply(Action::SubmitStart),
            Some(ScannerIntent::Reset) => self.apply(Action::Reset),
            None => {}
        }

        if self.state.in_flight().is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn card<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::NONE
        .fill(ui.visuals().extreme_bg_color)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(18, 16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

fn error_panel(ui: &mut egui::Ui, message: &str) {
    let red = egui::Color32::from_rgb(220, 38, 38);
    egui::Frame::NONE
        .fill(red.gamma_multiply(0.12))
        .stroke(egui::Stroke::new(1.0, red))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Error").strong().color(red));
            ui.label(message);
        });
}

fn dropped_item(file: &egui::DroppedFile) -> DroppedItem {
    DroppedItem {
        name: file.name.clone(),
        path: file.path.clone(),
        mime: file.mime.clone(),
        bytes: file.bytes.clone(),
    }
}

fn default_image_dir() -> Option<PathBuf> {
    dirs::picture_dir()
        .or_else(dirs::download_dir)
        .or_else(dirs::home_dir)
}
