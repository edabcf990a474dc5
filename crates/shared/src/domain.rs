use std::fmt;

use serde_json::Value;

/// Recognition payload exactly as the service returned it. Only
/// [`crate::presentation`] looks inside.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult(Value);

impl ScanResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Correlates one submission with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScanTicket(pub u64);

impl ScanTicket {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for ScanTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scan#{}", self.0)
    }
}
