//! Single-line geocoding to the best WGS84 candidate.

use deso_core::GeocodeResult;

use crate::client::{ArcgisClient, ADDRESS_CATEGORY, COUNTRY_CODE};
use crate::error::{ArcgisError, Service};
use crate::types::FindCandidatesResponse;

/// Candidates requested per geocode; only the first is used.
pub const MAX_LOCATIONS: usize = 5;

impl ArcgisClient {
    /// Resolves `address` to the service's highest-ranked candidate.
    ///
    /// When `magic_key` is a non-empty suggestion key it is forwarded so the
    /// service returns exactly the suggested candidate. Coordinates are
    /// returned as received.
    ///
    /// # Errors
    ///
    /// - [`ArcgisError::UnexpectedStatus`] / [`ArcgisError::Http`] /
    ///   [`ArcgisError::Deserialize`] when the exchange fails.
    /// - [`ArcgisError::EmptyAddress`] for blank input, before any request.
    /// - [`ArcgisError::NoMatch`] when there are no candidates.
    /// - [`ArcgisError::InvalidCoordinates`] when the top candidate lacks a
    ///   numeric x/y pair.
    pub async fn geocode(
        &self,
        address: &str,
        magic_key: Option<&str>,
    ) -> Result<GeocodeResult, ArcgisError> {
        if address.trim().is_empty() {
            return Err(ArcgisError::EmptyAddress);
        }
        let max = MAX_LOCATIONS.to_string();
        let mut params = vec![
            ("f", "json"),
            ("singleLine", address),
            ("maxLocations", max.as_str()),
            ("outFields", "*"),
            ("countryCode", COUNTRY_CODE),
            ("category", ADDRESS_CATEGORY),
        ];
        if let Some(key) = magic_key.filter(|k| !k.is_empty()) {
            params.push(("magicKey", key));
        }

        let url = Self::build_url(&self.geocode_url, &params);
        let body: FindCandidatesResponse = self.get_json(Service::Geocoder, &url).await?;

        if let Some(fault) = &body.error {
            tracing::warn!(
                code = ?fault.code,
                message = ?fault.message,
                "geocode service reported an error"
            );
        }

        let best = body.candidates.into_iter().next().ok_or(ArcgisError::NoMatch)?;
        let (longitude, latitude) = best.coordinates().ok_or(ArcgisError::InvalidCoordinates)?;
        let label = best
            .address
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| address.to_owned());

        tracing::debug!(%label, longitude, latitude, score = ?best.score, "geocoded address");
        Ok(GeocodeResult {
            label,
            longitude,
            latitude,
        })
    }
}
