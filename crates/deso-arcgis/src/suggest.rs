//! Address suggestions for partially typed input.

use deso_core::Suggestion;

use crate::client::{ArcgisClient, ADDRESS_CATEGORY, COUNTRY_CODE};
use crate::error::Service;
use crate::types::SuggestResponse;

/// Upper bound on suggestions requested from (and accepted from) the service.
pub const MAX_SUGGESTIONS: usize = 7;

impl ArcgisClient {
    /// Fetches up to [`MAX_SUGGESTIONS`] ranked address suggestions for `text`.
    ///
    /// Never fails: transport errors, non-2xx statuses and undecodable bodies
    /// are logged and degrade to an empty list. Server order is preserved.
    pub async fn suggest(&self, text: &str) -> Vec<Suggestion> {
        let max = MAX_SUGGESTIONS.to_string();
        let url = Self::build_url(
            &self.suggest_url,
            &[
                ("f", "json"),
                ("text", text),
                ("maxSuggestions", &max),
                ("countryCode", COUNTRY_CODE),
                ("category", ADDRESS_CATEGORY),
            ],
        );

        let body: SuggestResponse = match self.get_json(Service::Suggester, &url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "suggest request failed, showing no suggestions");
                return Vec::new();
            }
        };

        if let Some(fault) = &body.error {
            tracing::warn!(
                code = ?fault.code,
                message = ?fault.message,
                "suggest service reported an error"
            );
        }

        body.suggestions
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|s| Suggestion {
                display_text: s.text,
                disambiguation_key: s.magic_key,
            })
            .collect()
    }
}
