use serde::Deserialize;

/// Query string of an inbound lookup, `?barcode=...`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LookupRequest {
    #[serde(default)]
    pub barcode: Option<String>,
}

impl LookupRequest {
    /// The barcode when present and non-empty. No other format checks are made.
    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref().filter(|b| !b.is_empty())
    }
}
