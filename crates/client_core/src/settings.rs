use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PREVIEW_MAX_DIMENSION: u32 = 256;
pub const SETTINGS_FILE: &str = "plate_scan.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// `None` disables the client-side request timeout.
    pub request_timeout_secs: Option<u64>,
    pub preview_max_dimension: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            preview_max_dimension: DEFAULT_PREVIEW_MAX_DIMENSION,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

/// Defaults, then `plate_scan.toml` in the working directory, then the
/// process environment.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<ClientSettings>(&raw).map_err(|source| {
            SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => ClientSettings::default(),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    settings.apply_env(env)?;
    Ok(settings)
}

impl ClientSettings {
    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), SettingsError> {
        let read = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        if let Some(v) = read("PLATE_SCAN_API_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = read("APP__API_URL") {
            self.api_base_url = v;
        }

        if let Some(v) = read("APP__REQUEST_TIMEOUT_SECS") {
            let secs = v
                .trim()
                .parse::<u64>()
                .map_err(|_| SettingsError::InvalidEnv {
                    name: "APP__REQUEST_TIMEOUT_SECS",
                    value: v.clone(),
                })?;
            self.request_timeout_secs = (secs > 0).then_some(secs);
        }

        if let Some(v) = read("APP__PREVIEW_MAX_DIMENSION") {
            self.preview_max_dimension = v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|dimension| *dimension > 0)
                .ok_or_else(|| SettingsError::InvalidEnv {
                    name: "APP__PREVIEW_MAX_DIMENSION",
                    value: v.clone(),
                })?;
        }

        Ok(())
    }
}
