use std::fmt;

use thiserror::Error;

/// The upstream service a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Suggester,
    Geocoder,
    FeatureServer,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Suggester => write!(f, "Suggester"),
            Service::Geocoder => write!(f, "Geocoder"),
            Service::FeatureServer => write!(f, "FeatureServer"),
        }
    }
}

/// Errors returned by the ArcGIS client.
#[derive(Debug, Error)]
pub enum ArcgisError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("{service} HTTP {status}")]
    UnexpectedStatus { service: Service, status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The address to geocode is empty or whitespace; no request was sent.
    #[error("address is empty")]
    EmptyAddress,

    /// The geocoder returned zero candidates.
    #[error("No geocoding match for that address.")]
    NoMatch,

    /// The top candidate lacks a numeric x/y pair, or a point handed to the
    /// feature query is not finite.
    #[error("Geocoder returned invalid coordinates.")]
    InvalidCoordinates,

    /// A configured endpoint is not a usable URL.
    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
