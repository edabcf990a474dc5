use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{domain::ScanResult, error::ServiceErrorBody, protocol::RECOGNIZE_PLATE_PATH};
use tracing::{debug, info, warn};
use url::Url;

pub mod error;
pub mod settings;
pub mod upload;

pub use error::{FailureKind, RecognitionError};
pub use settings::{load_settings, ClientSettings, SettingsError};
pub use upload::{guess_mime, is_image_mime, ImageUpload};

#[async_trait]
pub trait PlateRecognizer: Send + Sync {
    async fn recognize(&self, upload: ImageUpload) -> Result<ScanResult, RecognitionError>;
}

#[derive(Debug, Clone)]
pub struct RecognitionClient {
    http: Client,
    endpoint: Url,
}

impl RecognitionClient {
    pub fn new(base_url: &str) -> Result<Self, RecognitionError> {
        Self::from_settings(&ClientSettings {
            api_base_url: base_url.to_string(),
            ..ClientSettings::default()
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, RecognitionError> {
        let endpoint = recognize_endpoint(&settings.api_base_url)?;
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(RecognitionError::ClientBuild)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PlateRecognizer for RecognitionClient {
    async fn recognize(&self, upload: ImageUpload) -> Result<ScanResult, RecognitionError> {
        info!(
            endpoint = %self.endpoint,
            filename = upload.filename(),
            mime_type = upload.mime_type(),
            bytes = upload.len(),
            "submitting image for recognition"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(upload.into_form()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ServiceErrorBody::parse(&body).map(|body| body.error);
            warn!(%status, error = ?message, "recognition service rejected the request");
            return Err(RecognitionError::Status { status, message });
        }

        let body = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&body).map_err(RecognitionError::Decode)?;
        debug!(%status, %payload, "recognition response received");
        Ok(ScanResult::new(payload))
    }
}

// The base may carry a path prefix and a trailing slash.
pub fn recognize_endpoint(base_url: &str) -> Result<Url, RecognitionError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let endpoint = Url::parse(&format!("{trimmed}{RECOGNIZE_PLATE_PATH}")).map_err(|source| {
        RecognitionError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            source,
        }
    })?;

    match endpoint.scheme() {
        "http" | "https" => Ok(endpoint),
        other => Err(RecognitionError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
