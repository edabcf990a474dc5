use serde::Deserialize;

/// Body the recognition service attaches to a failed request, e.g.
/// `{"error": "No file uploaded"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

impl ServiceErrorBody {
    /// Returns `None` when the body is not the service's error shape.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
