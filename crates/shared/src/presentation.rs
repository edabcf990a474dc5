//! Display model for a recognition payload. This is the only place the
//! otherwise opaque [`ScanResult`] is destructured.

use serde_json::Value;

use crate::{
    domain::ScanResult,
    protocol::{PlateDetection, RecognizePlateResponse},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    /// The service's `{"plates": [...]}` listing. Empty means nothing detected.
    Plates(Vec<PlateCard>),
    /// Any other JSON object, shown as its top-level fields.
    Fields(Vec<(String, String)>),
    /// Anything else, pretty-printed.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateCard {
    pub text: String,
    pub bounding_box: Option<String>,
    pub captured_at: Option<String>,
    pub registration: Registration,
    pub owner: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Known,
    Unknown,
    NotChecked,
}

impl Registration {
    pub fn label(self) -> &'static str {
        match self {
            Registration::Known => "Registered vehicle",
            Registration::Unknown => "Not in registry",
            Registration::NotChecked => "Registry not checked",
        }
    }
}

pub const UNREADABLE_PLATE: &str = "Unreadable";

impl ResultView {
    pub fn from_result(result: &ScanResult) -> Self {
        let value = result.as_value();
        if let Some(response) = RecognizePlateResponse::from_value(value) {
            return ResultView::Plates(response.plates.iter().map(PlateCard::from).collect());
        }
        match value {
            Value::Object(map) => ResultView::Fields(
                map.iter()
                    .map(|(key, value)| (key.clone(), display_value(value)))
                    .collect(),
            ),
            other => ResultView::Raw(
                serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
            ),
        }
    }
}

impl From<&PlateDetection> for PlateCard {
    fn from(plate: &PlateDetection) -> Self {
        let text = if plate.has_text() {
            plate.recognized_text.trim().to_string()
        } else {
            UNREADABLE_PLATE.to_string()
        };
        let registration = match plate.known {
            Some(true) => Registration::Known,
            Some(false) => Registration::Unknown,
            None => Registration::NotChecked,
        };
        Self {
            text,
            bounding_box: plate
                .bbox
                .map(|[x1, y1, x2, y2]| format!("({x1}, {y1}) - ({x2}, {y2})")),
            captured_at: plate
                .captured_at()
                .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .or_else(|| plate.timestamp.clone()),
            registration,
            owner: plate
                .owner
                .iter()
                .flatten()
                .map(|(key, value)| (key.clone(), display_value(value)))
                .collect(),
        }
    }
}

/// Strings without quotes, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
