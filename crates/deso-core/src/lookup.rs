use serde::{Deserialize, Serialize};

use crate::area::AreaAttributes;

/// One ranked address suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub display_text: String,
    /// Opaque token that pins the geocoder to this exact candidate.
    pub disambiguation_key: Option<String>,
}

/// Best geocoder candidate for an address, in WGS84 degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub label: String,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub last_longitude: f64,
    pub last_latitude: f64,
    /// The feature query whose answer produced `attributes`.
    pub last_request_url: String,
}

/// Terminal artifact of one address → area lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub address: GeocodeResult,
    /// `None` when no polygon matched the point.
    pub attributes: Option<AreaAttributes>,
    pub debug: DebugInfo,
}
