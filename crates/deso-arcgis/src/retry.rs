//! Retry with exponential back-off and jitter for ArcGIS requests.
//!
//! Only failures where no answer was received are retried. A non-2xx status
//! or an unparseable body is returned immediately: callers rely on a single
//! request per logical attempt (the area query's fallback is itself a second
//! attempt, not a retry).

use std::future::Future;
use std::time::Duration;

use crate::error::ArcgisError;

const MAX_DELAY_MS: u64 = 10_000;

/// Whether `err` means no answer arrived, so a repeat may succeed.
pub(crate) fn is_retriable(err: &ArcgisError) -> bool {
    match err {
        ArcgisError::Http(e) => e.is_timeout() || e.is_connect(),
        ArcgisError::UnexpectedStatus { .. }
        | ArcgisError::Deserialize { .. }
        | ArcgisError::EmptyAddress
        | ArcgisError::NoMatch
        | ArcgisError::InvalidCoordinates
        | ArcgisError::InvalidEndpoint { .. } => false,
    }
}

/// Sleep before retry number `retry` (1-based): `base × 2^(retry-1)`, capped
/// at 10 s, then scaled by a jitter factor in `[0.75, 1.25)`.
fn backoff_delay(retry: u32, base_ms: u64, jitter: f64) -> Duration {
    let exponent = retry.saturating_sub(1).min(10);
    let nominal = base_ms.saturating_mul(1 << exponent).min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (nominal as f64 * jitter) as u64;
    Duration::from_millis(jittered)
}

/// Runs `request`, repeating it up to `max_retries` more times while it fails
/// with a retriable error.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut request: F,
) -> Result<T, ArcgisError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ArcgisError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match request().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retriable(&err) && retries < max_retries => err,
            Err(err) => return Err(err),
        };
        retries += 1;
        let jitter = 0.75 + rand::random::<f64>() * 0.5;
        let delay = backoff_delay(retries, backoff_base_ms, jitter);
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "ArcGIS request failed before a response, backing off"
        );
        tokio::time::sleep(delay).await;
    }
}
