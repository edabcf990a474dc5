use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Path of the recognition endpoint, relative to the configured base URL.
pub const RECOGNIZE_PLATE_PATH: &str = "/api/recognize-plate";

/// Multipart field carrying the raw image bytes.
pub const IMAGE_FIELD: &str = "image";

/// Typed view over the service's `{"plates": [...]}` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecognizePlateResponse {
    pub plates: Vec<PlateDetection>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlateDetection {
    #[serde(default)]
    pub recognized_text: String,
    /// `[x1, y1, x2, y2]` in source image pixels.
    #[serde(default)]
    pub bbox: Option<[i64; 4]>,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Present only when the service has a vehicle registry configured.
    #[serde(default)]
    pub known: Option<bool>,
    #[serde(default)]
    pub owner: Option<Map<String, Value>>,
}

impl RecognizePlateResponse {
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.get("plates")?.is_array() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

impl PlateDetection {
    pub fn captured_at(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }

    pub fn has_text(&self) -> bool {
        !self.recognized_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_plate_listing_with_registry_fields() {
        let value = json!({
            "plates": [{
                "recognized_text": "KA01AB1234",
                "bbox": [10, 20, 110, 60],
                "timestamp": "2024-05-01T10:11:12.345678",
                "known": true,
                "owner": {"name": "Jane Doe"}
            }]
        });

        let response = RecognizePlateResponse::from_value(&value).expect("plate listing");
        let plate = &response.plates[0];
        assert_eq!(plate.recognized_text, "KA01AB1234");
        assert_eq!(plate.bbox, Some([10, 20, 110, 60]));
        assert_eq!(plate.known, Some(true));
        assert!(plate.captured_at().is_some());
        assert_eq!(
            plate.owner.as_ref().and_then(|o| o.get("name")),
            Some(&json!("Jane Doe"))
        );
    }

    #[test]
    fn other_shapes_are_not_plate_listings() {
        assert!(RecognizePlateResponse::from_value(&json!({"plate": "ABC123"})).is_none());
        assert!(RecognizePlateResponse::from_value(&json!({"plates": "ABC123"})).is_none());
        assert!(RecognizePlateResponse::from_value(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn empty_listing_is_valid() {
        let response =
            RecognizePlateResponse::from_value(&json!({"plates": []})).expect("empty listing");
        assert!(response.plates.is_empty());
    }
}
