//! One-shot command handlers: `suggest`, `geocode`, and `lookup`.

use deso_arcgis::ArcgisClient;
use deso_widget::ResultView;

/// Print ranked suggestions for `text`, one per line with its key.
/// Suggestion failures are logged by the client and show as an empty list.
pub(crate) async fn run_suggest(client: &ArcgisClient, text: &str) {
    let suggestions = client.suggest(text).await;
    if suggestions.is_empty() {
        println!("no suggestions for {text:?}");
        return;
    }

    for (i, suggestion) in suggestions.iter().enumerate() {
        let key = suggestion.disambiguation_key.as_deref().unwrap_or("\u{2014}");
        println!("{:>2}. {:<60} {key}", i + 1, suggestion.display_text);
    }
}

/// Print the best geocoder candidate for `address`.
///
/// # Errors
///
/// Returns an error if geocoding fails or finds no match. A blank address
/// prints nothing and sends no request.
pub(crate) async fn run_geocode(
    client: &ArcgisClient,
    address: &str,
    magic_key: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    if address.trim().is_empty() {
        tracing::info!("blank address, nothing to geocode");
        return Ok(());
    }
    let result = client.geocode(address, magic_key).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.label);
        println!("{:.6}, {:.6} (WGS84)", result.latitude, result.longitude);
    }
    Ok(())
}

/// Run the full address → area pipeline and print the result card.
///
/// # Errors
///
/// Returns an error if geocoding or the area query fails. A point outside
/// every polygon is not an error. A blank address prints nothing and sends
/// no request.
pub(crate) async fn run_lookup(
    client: &ArcgisClient,
    address: &str,
    magic_key: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let address = address.trim();
    if address.is_empty() {
        tracing::info!("blank address, nothing to look up");
        return Ok(());
    }
    let result = deso_widget::run_lookup(client, address, magic_key).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", ResultView::from_result(&result));
    }
    Ok(())
}
