//! Turns picker and drag-and-drop input into uploads.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use client_core::{guess_mime, is_image_mime, ImageUpload};

/// One item the OS handed over in a drop. Native drops carry a path; web
/// drops carry bytes and a declared MIME type.
#[derive(Debug, Clone, Default)]
pub struct DroppedItem {
    pub name: String,
    pub path: Option<PathBuf>,
    pub mime: String,
    pub bytes: Option<Arc<[u8]>>,
}

impl DroppedItem {
    pub fn declared_mime(&self) -> String {
        let declared = self.mime.trim();
        if !declared.is_empty() {
            return declared.to_string();
        }
        match &self.path {
            Some(path) => guess_mime(path),
            None => guess_mime(Path::new(&self.name)),
        }
    }

    fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub enum Acquired {
    Ready {
        upload: ImageUpload,
        source: Option<PathBuf>,
    },
    NotAnImage,
    Unreadable {
        path: Option<PathBuf>,
        reason: String,
    },
}

/// Picker path: the dialog's filter is the only type restriction.
pub fn acquire_picked(path: &Path) -> Acquired {
    match ImageUpload::from_path(path) {
        Ok(upload) => Acquired::Ready {
            upload,
            source: Some(path.to_path_buf()),
        },
        Err(err) => Acquired::Unreadable {
            path: Some(path.to_path_buf()),
            reason: err.to_string(),
        },
    }
}

/// Drop path: only the first item counts and it must be an `image/*` type.
/// The type is checked before any bytes are read.
pub fn acquire_dropped(items: &[DroppedItem]) -> Acquired {
    let Some(item) = items.first() else {
        return Acquired::NotAnImage;
    };
    let mime = item.declared_mime();
    if !is_image_mime(&mime) {
        return Acquired::NotAnImage;
    }

    let bytes: Arc<[u8]> = match (&item.bytes, &item.path) {
        (Some(bytes), _) => Arc::clone(bytes),
        (None, Some(path)) => match fs::read(path) {
            Ok(bytes) => bytes.into(),
            Err(err) => {
                return Acquired::Unreadable {
                    path: Some(path.clone()),
                    reason: err.to_string(),
                }
            }
        },
        (None, None) => {
            return Acquired::Unreadable {
                path: None,
                reason: "dropped item carries neither bytes nor a path".to_string(),
            }
        }
    };

    Acquired::Ready {
        upload: ImageUpload::new(item.display_name(), mime, bytes),
        source: item.path.clone(),
    }
}
