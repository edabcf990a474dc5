//! Scan result rendering. Pure function of the payload.

use eframe::egui;
use shared::{
    domain::ScanResult,
    presentation::{PlateCard, Registration, ResultView},
};

pub fn show(ui: &mut egui::Ui, result: &ScanResult) {
    ui.label(egui::RichText::new("Scan Results").strong().size(20.0));
    ui.add_space(6.0);

    match ResultView::from_result(result) {
        ResultView::Plates(cards) if cards.is_empty() => {
            ui.weak("No license plates detected");
        }
        ResultView::Plates(cards) => {
            for card in &cards {
                plate_card(ui, card);
                ui.add_space(6.0);
            }
        }
        ResultView::Fields(fields) => {
            egui::Grid::new("scan_result_fields")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (key, value) in &fields {
                        ui.label(egui::RichText::new(key).strong());
                        ui.label(value);
                        ui.end_row();
                    }
                });
        }
        ResultView::Raw(text) => {
            egui::ScrollArea::vertical()
                .max_height(240.0)
                .show(ui, |ui| {
                    ui.monospace(text);
                });
        }
    }
}

fn plate_card(ui: &mut egui::Ui, card: &PlateCard) {
    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&card.text).monospace().strong().size(18.0));
                ui.label(
                    egui::RichText::new(card.registration.label())
                        .color(registration_color(card.registration)),
                );
            });
            if let Some(bbox) = &card.bounding_box {
                ui.small(format!("Bounding box: {bbox}"));
            }
            if let Some(at) = &card.captured_at {
                ui.small(format!("Scanned at: {at}"));
            }
            if !card.owner.is_empty() {
                ui.add_space(4.0);
                ui.label(egui::RichText::new("Owner").strong());
                for (key, value) in &card.owner {
                    ui.label(format!("{key}: {value}"));
                }
            }
        });
}

fn registration_color(registration: Registration) -> egui::Color32 {
    match registration {
        Registration::Known => egui::Color32::from_rgb(74, 222, 128),
        Registration::Unknown => egui::Color32::from_rgb(248, 113, 113),
        Registration::NotChecked => egui::Color32::GRAY,
    }
}
