//! Client for the ArcGIS geocoding and feature-query services backing the
//! DeSO address lookup.
//!
//! Three operations are exposed on [`ArcgisClient`]: address suggestions,
//! single-line geocoding, and the point-in-polygon area query with its
//! Web-Mercator fallback.

pub mod client;
pub mod error;
pub mod feature;
pub mod geocode;
pub mod projection;
pub mod suggest;
pub mod types;

mod retry;

pub use client::{ArcgisClient, ClientOptions};
pub use error::{ArcgisError, Service};
pub use feature::AreaResolution;
pub use projection::{lon_lat_to_web_mercator, web_mercator_to_lon_lat, SpatialReference};
