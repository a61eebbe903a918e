//! One full lookup run: geocode, then resolve the area for that point.

use deso_arcgis::ArcgisError;
use deso_core::{DebugInfo, LookupResult};

use crate::backend::AddressBackend;

/// Shown when a failure carries no message of its own.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Resolves `address` to its DeSO area.
///
/// The area query starts only after geocoding produced a coordinate. A point
/// outside every polygon is a successful run with `attributes: None`.
///
/// # Errors
///
/// Returns [`ArcgisError::EmptyAddress`] without contacting the backend when
/// `address` is blank, otherwise the first [`ArcgisError`] from either step.
pub async fn run_lookup<B: AddressBackend>(
    backend: &B,
    address: &str,
    magic_key: Option<&str>,
) -> Result<LookupResult, ArcgisError> {
    if address.trim().is_empty() {
        return Err(ArcgisError::EmptyAddress);
    }
    let geocoded = backend.geocode(address, magic_key).await?;
    let area = backend
        .resolve_area(geocoded.longitude, geocoded.latitude)
        .await?;

    Ok(LookupResult {
        debug: DebugInfo {
            last_longitude: geocoded.longitude,
            last_latitude: geocoded.latitude,
            last_request_url: area.request_url.to_string(),
        },
        attributes: area.attributes,
        address: geocoded,
    })
}

/// User-facing text for a failed run.
pub fn failure_message(err: &impl std::fmt::Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE.to_owned()
    } else {
        message
    }
}
