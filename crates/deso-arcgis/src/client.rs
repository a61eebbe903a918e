//! HTTP client for the ArcGIS REST services.
//!
//! Wraps `reqwest` with endpoint management, per-service status handling and
//! typed response deserialization. The operations themselves live in
//! [`crate::suggest`], [`crate::geocode`] and [`crate::feature`].

use std::time::Duration;

use deso_core::{AppConfig, EndpointConfig};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::{ArcgisError, Service};
use crate::retry::retry_with_backoff;

/// Fixed country filter; other countries are not supported.
pub(crate) const COUNTRY_CODE: &str = "SE";
pub(crate) const ADDRESS_CATEGORY: &str = "Address";

/// Transport settings for [`ArcgisClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after a network-level failure. `0` disables retries.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "deso-lookup/0.1 (address-to-area)".to_owned(),
            max_retries: 2,
            backoff_base_ms: 500,
        }
    }
}

impl ClientOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        }
    }
}

/// Client for the suggest, find-candidates and feature-query endpoints.
///
/// Use [`ArcgisClient::new`] with [`EndpointConfig::default`] for the public
/// services, or point the endpoints at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ArcgisClient {
    client: Client,
    pub(crate) suggest_url: Url,
    pub(crate) geocode_url: Url,
    pub(crate) feature_query_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ArcgisClient {
    /// Creates a client for the given endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ArcgisError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ArcgisError::InvalidEndpoint`] if any
    /// endpoint is not a valid URL.
    pub fn new(endpoints: &EndpointConfig, options: &ClientOptions) -> Result<Self, ArcgisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(options.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            suggest_url: parse_endpoint(&endpoints.suggest_url)?,
            geocode_url: parse_endpoint(&endpoints.geocode_url)?,
            feature_query_url: parse_endpoint(&endpoints.feature_query_url)?,
            max_retries: options.max_retries,
            backoff_base_ms: options.backoff_base_ms,
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ArcgisClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ArcgisError> {
        Self::new(&config.endpoints, &ClientOptions::from_app_config(config))
    }

    /// Appends `params` to `base` in order, form-urlencoded.
    pub(crate) fn build_url(base: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as `T`.
    ///
    /// Network-level failures are retried per [`ClientOptions`]; status and
    /// decode failures are not.
    ///
    /// # Errors
    ///
    /// - [`ArcgisError::Http`] on network failure after retries.
    /// - [`ArcgisError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ArcgisError::Deserialize`] if the body does not match `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        service: Service,
        url: &Url,
    ) -> Result<T, ArcgisError> {
        tracing::debug!(%service, %url, "ArcGIS request");
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ArcgisError::UnexpectedStatus {
                    service,
                    status: status.as_u16(),
                });
            }
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ArcgisError::Deserialize {
                context: format!("{service} response from {url}"),
                source: e,
            })
        })
        .await
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ArcgisError> {
    let url = Url::parse(raw).map_err(|e| ArcgisError::InvalidEndpoint {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ArcgisError::InvalidEndpoint {
            url: raw.to_owned(),
            reason: "expected an absolute http(s) URL".to_owned(),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
