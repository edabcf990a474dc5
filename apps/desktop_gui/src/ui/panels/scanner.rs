//! Upload card: drop zone, preview, and the scan controls.

use std::path::Path;

use client_core::ImageUpload;
use eframe::egui;

use crate::ui::preview::PreviewTexture;

const INSTRUCTIONS: [&str; 4] = [
    "Upload a clear image of a vehicle license plate",
    "Make sure the plate is visible and not obscured",
    "The system works best with front-facing, well-lit images",
    "Supported formats: JPG, PNG, JPEG",
];

const SELECTED_BORDER: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);
const HOVER_BORDER: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);
const REJECTED_BORDER: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);

/// Everything the card needs to draw itself for one frame.
pub struct ScannerView<'a> {
    pub preview: Option<&'a PreviewTexture>,
    pub upload: Option<&'a ImageUpload>,
    pub file_input: Option<&'a Path>,
    pub can_submit: bool,
    pub drop_hover: bool,
    pub drop_rejected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerIntent {
    PickFile,
    Submit,
    Reset,
}

pub fn show(ui: &mut egui::Ui, view: &ScannerView<'_>) -> Option<ScannerIntent> {
    let mut intent = None;

    ui.label(
        egui::RichText::new("Upload License Plate Image")
            .strong()
            .size(20.0),
    );
    ui.add_space(6.0);

    let border = if view.drop_hover {
        HOVER_BORDER
    } else if view.drop_rejected {
        REJECTED_BORDER
    } else if view.preview.is_some() {
        SELECTED_BORDER
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };

    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .stroke(egui::Stroke::new(2.0, border))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(16, 14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                match view.preview {
                    Some(preview) => match preview.texture() {
                        Some(texture) => {
                            ui.add(
                                egui::Image::new(texture)
                                    .fit_to_exact_size(preview.size())
                                    .corner_radius(6.0),
                            );
                        }
                        None => {
                            ui.add_space(24.0);
                            ui.weak("Preview unavailable");
                            ui.add_space(24.0);
                        }
                    },
                    None => {
                        ui.add_space(24.0);
                        ui.label(egui::RichText::new("🖼").size(36.0).weak());
                        ui.weak("Drag and drop an image here, or click to select");
                        ui.add_space(24.0);
                    }
                }

                if let Some(upload) = view.upload {
                    ui.small(format!(
                        "{} · {} · {}",
                        upload.filename(),
                        upload.mime_type(),
                        human_readable_bytes(upload.len())
                    ));
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Select Image").clicked() {
                        intent = Some(ScannerIntent::PickFile);
                    }
                    if let Some(name) = view.file_input.and_then(Path::file_name) {
                        ui.weak(name.to_string_lossy());
                    }

                    if view.preview.is_some() {
                        if ui
                            .add_enabled(view.can_submit, egui::Button::new("Scan License Plate"))
                            .clicked()
                        {
                            intent = Some(ScannerIntent::Submit);
                        }
                        if ui.button("Reset").clicked() {
                            intent = Some(ScannerIntent::Reset);
                        }
                    }
                });
            });
        });

    ui.add_space(10.0);
    ui.label(egui::RichText::new("Instructions:").strong());
    for line in INSTRUCTIONS {
        ui.label(format!("• {line}"));
    }

    intent
}

fn human_readable_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else if value.fract() == 0.0 {
        format!("{value:.0} {}", UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::human_readable_bytes;

    #[test]
    fn formats_upload_sizes_readably() {
        assert_eq!(human_readable_bytes(0), "0 B");
        assert_eq!(human_readable_bytes(1023), "1023 B");
        assert_eq!(human_readable_bytes(1024), "1 KB");
        assert_eq!(human_readable_bytes(1536), "1.5 KB");
        assert_eq!(human_readable_bytes(3 * 1024 * 1024), "3 MB");
    }
}
