//! The seam between the session and the geo-services.

use std::future::Future;

use deso_arcgis::{ArcgisClient, ArcgisError, AreaResolution};
use deso_core::{GeocodeResult, Suggestion};

/// The three remote operations a lookup session depends on.
///
/// [`ArcgisClient`] is the production implementation; tests substitute
/// scripted backends to control timing and failures.
pub trait AddressBackend: Send + Sync + 'static {
    /// Ranked suggestions for partial input. Failures degrade to an empty list.
    fn suggest(&self, text: &str) -> impl Future<Output = Vec<Suggestion>> + Send;

    fn geocode(
        &self,
        address: &str,
        magic_key: Option<&str>,
    ) -> impl Future<Output = Result<GeocodeResult, ArcgisError>> + Send;

    fn resolve_area(
        &self,
        lon: f64,
        lat: f64,
    ) -> impl Future<Output = Result<AreaResolution, ArcgisError>> + Send;
}

impl AddressBackend for ArcgisClient {
    fn suggest(&self, text: &str) -> impl Future<Output = Vec<Suggestion>> + Send {
        ArcgisClient::suggest(self, text)
    }

    fn geocode(
        &self,
        address: &str,
        magic_key: Option<&str>,
    ) -> impl Future<Output = Result<GeocodeResult, ArcgisError>> + Send {
        ArcgisClient::geocode(self, address, magic_key)
    }

    fn resolve_area(
        &self,
        lon: f64,
        lat: f64,
    ) -> impl Future<Output = Result<AreaResolution, ArcgisError>> + Send {
        ArcgisClient::resolve_area(self, lon, lat)
    }
}
