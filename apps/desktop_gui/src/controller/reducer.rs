//! Scan workflow state and the transitions that are allowed to touch it.
//!
//! The root view owns an [`AppState`]; every change goes through [`reduce`].
//! `P` is the preview handle type. A [`SelectedFile`] owns its preview, so
//! replacing or clearing the selection releases the handle.

use std::path::PathBuf;

use client_core::ImageUpload;
use shared::domain::{ScanResult, ScanTicket};
use tracing::{debug, error, info};

use crate::controller::events::{ScanError, SubmissionFailure};

/// What the root view renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowState {
    pub is_loading: bool,
    pub result: Option<ScanResult>,
    pub error: Option<ScanError>,
}

impl WorkflowState {
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(ScanError::message)
    }

    /// Errors replace any shown result, so the root never renders both.
    fn show_error(&mut self, error: ScanError) {
        self.result = None;
        self.error = Some(error);
    }

    /// The result is only shown once loading has finished.
    pub fn visible_result(&self) -> Option<&ScanResult> {
        if self.is_loading {
            None
        } else {
            self.result.as_ref()
        }
    }
}

#[derive(Debug)]
pub struct SelectedFile<P> {
    upload: ImageUpload,
    preview: P,
    source: Option<PathBuf>,
}

impl<P> SelectedFile<P> {
    pub fn new(upload: ImageUpload, preview: P, source: Option<PathBuf>) -> Self {
        Self {
            upload,
            preview,
            source,
        }
    }

    pub fn upload(&self) -> &ImageUpload {
        &self.upload
    }

    pub fn preview(&self) -> &P {
        &self.preview
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    HasSelection,
    Submitting,
    ShowingResult,
}

#[derive(Debug)]
pub struct AppState<P> {
    workflow: WorkflowState,
    selection: Option<SelectedFile<P>>,
    /// Value of the picker control: the last path chosen through the dialog.
    file_input: Option<PathBuf>,
    in_flight: Option<ScanTicket>,
    last_ticket: ScanTicket,
}

impl<P> Default for AppState<P> {
    fn default() -> Self {
        Self {
            workflow: WorkflowState::default(),
            selection: None,
            file_input: None,
            in_flight: None,
            last_ticket: ScanTicket(0),
        }
    }
}

impl<P> AppState<P> {
    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    pub fn selection(&self) -> Option<&SelectedFile<P>> {
        self.selection.as_ref()
    }

    pub fn file_input(&self) -> Option<&PathBuf> {
        self.file_input.as_ref()
    }

    pub fn in_flight(&self) -> Option<ScanTicket> {
        self.in_flight
    }

    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && self.in_flight.is_none()
    }

    pub fn phase(&self) -> ScanPhase {
        if self.in_flight.is_some() {
            ScanPhase::Submitting
        } else if self.workflow.result.is_some() {
            ScanPhase::ShowingResult
        } else if self.selection.is_some() {
            ScanPhase::HasSelection
        } else {
            ScanPhase::Idle
        }
    }
}

pub enum Action<P> {
    /// A file chosen through the picker dialog.
    Select(SelectedFile<P>),
    /// A dropped file that passed the image type check.
    DropValid(SelectedFile<P>),
    DropInvalid,
    /// The chosen file could not be read from disk.
    SelectionUnreadable { path: Option<PathBuf>, reason: String },
    SubmitStart,
    SubmitSuccess {
        ticket: ScanTicket,
        result: ScanResult,
    },
    SubmitFailure {
        ticket: ScanTicket,
        failure: SubmissionFailure,
    },
    Reset,
}

/// Side effect the caller must carry out after a transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Submit {
        ticket: ScanTicket,
        upload: ImageUpload,
    },
}

pub fn reduce<P>(state: &mut AppState<P>, action: Action<P>) -> Effect {
    match action {
        Action::Select(selected) => {
            info!(
                filename = selected.upload.filename(),
                mime_type = selected.upload.mime_type(),
                bytes = selected.upload.len(),
                "image selected"
            );
            state.file_input = selected.source.clone();
            state.selection = Some(selected);
            state.workflow.error = None;
        }
        Action::DropValid(selected) => {
            info!(
                filename = selected.upload.filename(),
                mime_type = selected.upload.mime_type(),
                bytes = selected.upload.len(),
                "image dropped"
            );
            state.selection = Some(selected);
            state.workflow.error = None;
        }
        Action::DropInvalid => {
            debug!("rejected dropped item that is not an image");
            state.workflow.show_error(ScanError::invalid_drop());
        }
        Action::SelectionUnreadable { path, reason } => {
            error!(path = ?path, "error reading selected file: {reason}");
            state.workflow.show_error(ScanError::unreadable_file());
        }
        Action::SubmitStart => {
            let Some(selected) = state.selection.as_ref() else {
                state.workflow.show_error(ScanError::no_selection());
                return Effect::None;
            };
            if let Some(ticket) = state.in_flight {
                debug!(%ticket, "ignoring submit while a scan is in flight");
                return Effect::None;
            }

            let ticket = state.last_ticket.next();
            state.last_ticket = ticket;
            state.in_flight = Some(ticket);
            state.workflow.is_loading = true;
            state.workflow.result = None;
            state.workflow.error = None;
            info!(%ticket, filename = selected.upload.filename(), "scan started");
            return Effect::Submit {
                ticket,
                upload: selected.upload.clone(),
            };
        }
        Action::SubmitSuccess { ticket, result } => {
            if state.in_flight != Some(ticket) {
                debug!(%ticket, "discarding stale scan result");
                return Effect::None;
            }
            state.in_flight = None;
            state.workflow.is_loading = false;
            state.workflow.error = None;
            state.workflow.result = Some(result);
            info!(%ticket, "scan completed");
        }
        Action::SubmitFailure { ticket, failure } => {
            if state.in_flight != Some(ticket) {
                debug!(%ticket, kind = failure.kind.as_str(), "discarding stale scan failure");
                return Effect::None;
            }
            state.in_flight = None;
            state.workflow.is_loading = false;
            state.workflow.show_error(ScanError::submission());
            error!(
                %ticket,
                kind = failure.kind.as_str(),
                "error uploading image: {}",
                failure.detail
            );
        }
        Action::Reset => {
            if let Some(ticket) = state.in_flight.take() {
                debug!(%ticket, "reset abandons in-flight scan");
            }
            state.selection = None;
            state.file_input = None;
            state.workflow = WorkflowState::default();
        }
    }
    Effect::None
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
