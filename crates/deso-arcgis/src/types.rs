//! ArcGIS REST response types.
//!
//! Only the fields the lookup pipeline reads are modelled. Every collection
//! defaults to empty so that an answer carrying only an `error` envelope
//! deserializes cleanly.

use deso_core::AreaAttributes;
use serde::Deserialize;

/// Error envelope ArcGIS returns with HTTP 200 on application-level failure.
#[derive(Debug, Deserialize)]
pub struct ServiceFault {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// suggest
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub suggestions: Vec<SuggestItem>,
    #[serde(default)]
    pub error: Option<ServiceFault>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestItem {
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "magicKey")]
    pub magic_key: Option<String>,
}

// ---------------------------------------------------------------------------
// findAddressCandidates
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct FindCandidatesResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub error: Option<ServiceFault>,
}

/// A geocoder candidate. `location` is kept as raw JSON: the service has been
/// seen to emit strings or nulls in place of numbers, and that must surface as
/// an invalid-coordinates error rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl Candidate {
    /// The `(x, y)` pair when both are JSON numbers.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let location = self.location.as_ref()?;
        let x = location.get("x")?.as_f64()?;
        let y = location.get("y")?.as_f64()?;
        Some((x, y))
    }
}

// ---------------------------------------------------------------------------
// FeatureServer query
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct FeatureQueryResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub error: Option<ServiceFault>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub attributes: Option<AreaAttributes>,
}
