use std::{fs, io, path::Path, sync::Arc};

use reqwest::multipart::{Form, Part};
use shared::protocol::IMAGE_FIELD;

const FALLBACK_MIME: &str = "application/octet-stream";
const FALLBACK_FILENAME: &str = "image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    filename: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl ImageUpload {
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let filename = filename.into();
        let mime_type = mime_type.into();
        Self {
            filename: if filename.trim().is_empty() {
                FALLBACK_FILENAME.to_string()
            } else {
                filename
            },
            mime_type: if mime_type.trim().is_empty() {
                FALLBACK_MIME.to_string()
            } else {
                mime_type
            },
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(filename, guess_mime(path), bytes))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }

    pub(crate) fn into_form(self) -> reqwest::Result<Form> {
        let part = Part::bytes(self.bytes.to_vec())
            .file_name(self.filename)
            .mime_str(&self.mime_type)?;
        Ok(Form::new().part(IMAGE_FIELD, part))
    }
}

pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME)
        .to_string()
}

/// `true` for `image/*` content types.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}
