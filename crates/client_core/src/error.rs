use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("invalid recognition service base url '{base_url}': {source}")]
    InvalidBaseUrl {
        base_url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported recognition service url scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("recognition request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(
        "recognition service returned {status}: {}",
        .message.as_deref().unwrap_or("no error body")
    )]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("recognition response was not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Diagnostic only; the user sees one generic message for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Transport,
    Timeout,
    Status,
    Decode,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Configuration => "configuration",
            FailureKind::Transport => "transport",
            FailureKind::Timeout => "timeout",
            FailureKind::Status => "status",
            FailureKind::Decode => "decode",
        }
    }
}

impl RecognitionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RecognitionError::InvalidBaseUrl { .. }
            | RecognitionError::UnsupportedScheme(_)
            | RecognitionError::ClientBuild(_) => FailureKind::Configuration,
            RecognitionError::Transport(err) if err.is_timeout() => FailureKind::Timeout,
            RecognitionError::Transport(_) => FailureKind::Transport,
            RecognitionError::Status { .. } => FailureKind::Status,
            RecognitionError::Decode(_) => FailureKind::Decode,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RecognitionError::Status { status, .. } => Some(*status),
            RecognitionError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
