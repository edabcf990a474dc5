//! Backend commands queued from UI to backend worker.

use client_core::ImageUpload;
use shared::domain::ScanTicket;

pub enum BackendCommand {
    RecognizePlate {
        ticket: ScanTicket,
        upload: ImageUpload,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::RecognizePlate { .. } => "recognize_plate",
        }
    }
}
