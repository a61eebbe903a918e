//! Point-in-polygon query against the DeSO feature layer.
//!
//! The layer answers reliably only for some declared input references, so a
//! miss under WGS84 is retried once with the point projected to Web Mercator.

use deso_core::AreaAttributes;
use reqwest::Url;

use crate::client::ArcgisClient;
use crate::error::{ArcgisError, Service};
use crate::projection::{lon_lat_to_web_mercator, PointGeometry, SpatialReference};
use crate::types::FeatureQueryResponse;

/// Search tolerance around the point, in meters.
pub const SEARCH_DISTANCE_METERS: u32 = 300;

/// Outcome of an area query. `attributes` is `None` when no polygon lies
/// within the search distance of the point.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaResolution {
    pub attributes: Option<AreaAttributes>,
    /// URL of the attempt whose answer is reported.
    pub request_url: Url,
}

impl ArcgisClient {
    /// Finds the polygon containing (or within 300 m of) `lon`/`lat`.
    ///
    /// Queries with a WGS84 point first; only if that yields no feature is a
    /// second query issued with Web-Mercator coordinates and `inSR=102100`.
    ///
    /// # Errors
    ///
    /// - [`ArcgisError::UnexpectedStatus`] / [`ArcgisError::Http`] /
    ///   [`ArcgisError::Deserialize`] when either exchange fails.
    /// - [`ArcgisError::InvalidCoordinates`] if the point is not finite.
    pub async fn resolve_area(&self, lon: f64, lat: f64) -> Result<AreaResolution, ArcgisError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ArcgisError::InvalidCoordinates);
        }

        let geographic = PointGeometry::new(lon, lat, SpatialReference::Wgs84);
        let first = self.query_point(&geographic).await?;
        if first.attributes.is_some() {
            return Ok(first);
        }

        let (x, y) = lon_lat_to_web_mercator(lon, lat);
        tracing::debug!(
            lon,
            lat,
            x,
            y,
            "no feature under WGS84, retrying with Web Mercator"
        );
        let projected = PointGeometry::new(x, y, SpatialReference::WebMercator);
        self.query_point(&projected).await
    }

    async fn query_point(&self, point: &PointGeometry) -> Result<AreaResolution, ArcgisError> {
        let geometry = serde_json::to_string(point).map_err(|e| ArcgisError::Deserialize {
            context: "point geometry".to_owned(),
            source: e,
        })?;
        let in_sr = point.spatial_reference.wkid.to_string();
        let distance = SEARCH_DISTANCE_METERS.to_string();

        let url = Self::build_url(
            &self.feature_query_url,
            &[
                ("f", "json"),
                ("where", "1=1"),
                ("geometry", &geometry),
                ("geometryType", "esriGeometryPoint"),
                ("inSR", &in_sr),
                ("distance", &distance),
                ("units", "esriSRUnit_Meter"),
                ("spatialRel", "esriSpatialRelIntersects"),
                ("outFields", "*"),
                ("returnGeometry", "false"),
            ],
        );

        let body: FeatureQueryResponse = self.get_json(Service::FeatureServer, &url).await?;
        if let Some(fault) = &body.error {
            tracing::warn!(
                code = ?fault.code,
                message = ?fault.message,
                in_sr = %in_sr,
                "feature service reported an error"
            );
        }

        let attributes = body.features.into_iter().next().and_then(|f| f.attributes);
        tracing::debug!(in_sr = %in_sr, matched = attributes.is_some(), "feature query answered");
        Ok(AreaResolution {
            attributes,
            request_url: url,
        })
    }
}
