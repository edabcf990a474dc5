//! Backend events and error modeling for the scanner controller.

use client_core::{FailureKind, RecognitionError};
use shared::domain::{ScanResult, ScanTicket};
pub use shared::messages::{
    DROP_IMAGE_FILE, SELECT_IMAGE_FIRST, SUBMISSION_FAILED, UNREADABLE_FILE,
};

use crate::controller::reducer::Action;

pub enum UiEvent {
    ScanSucceeded {
        ticket: ScanTicket,
        result: ScanResult,
    },
    ScanFailed {
        ticket: ScanTicket,
        failure: SubmissionFailure,
    },
}

impl UiEvent {
    pub fn into_action<P>(self) -> Action<P> {
        match self {
            UiEvent::ScanSucceeded { ticket, result } => Action::SubmitSuccess { ticket, result },
            UiEvent::ScanFailed { ticket, failure } => Action::SubmitFailure { ticket, failure },
        }
    }
}

/// Why a submission failed. Kept for the diagnostic log only; the user sees
/// [`SUBMISSION_FAILED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl SubmissionFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl From<&RecognitionError> for SubmissionFailure {
    fn from(err: &RecognitionError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorCategory {
    Selection,
    InvalidDrop,
    Submission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    category: ScanErrorCategory,
    message: String,
}

impl ScanError {
    pub fn no_selection() -> Self {
        Self::new(ScanErrorCategory::Selection, SELECT_IMAGE_FIRST)
    }

    pub fn unreadable_file() -> Self {
        Self::new(ScanErrorCategory::Selection, UNREADABLE_FILE)
    }

    pub fn invalid_drop() -> Self {
        Self::new(ScanErrorCategory::InvalidDrop, DROP_IMAGE_FILE)
    }

    pub fn submission() -> Self {
        Self::new(ScanErrorCategory::Submission, SUBMISSION_FAILED)
    }

    fn new(category: ScanErrorCategory, message: &str) -> Self {
        Self {
            category,
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ScanErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
