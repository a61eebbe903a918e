use std::collections::HashMap;
use std::sync::Mutex;

use deso_arcgis::{AreaResolution, Service};
use deso_core::{AreaAttributes, AttributeValue, GeocodeResult};

use super::*;

const DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Default)]
struct ScriptedBackend {
    suggest_delays: HashMap<String, Duration>,
    geocode_delays: HashMap<String, Duration>,
    unmatched: Vec<String>,
    area_status: Option<u16>,
    suggest_calls: Mutex<Vec<String>>,
    geocode_calls: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedBackend {
    fn slow_suggest(mut self, text: &str, delay: Duration) -> Self {
        self.suggest_delays.insert(text.to_owned(), delay);
        self
    }

    fn slow_geocode(mut self, address: &str, delay: Duration) -> Self {
        self.geocode_delays.insert(address.to_owned(), delay);
        self
    }

    fn unmatched(mut self, address: &str) -> Self {
        self.unmatched.push(address.to_owned());
        self
    }

    fn area_fails_with(mut self, status: u16) -> Self {
        self.area_status = Some(status);
        self
    }

    fn suggest_calls(&self) -> Vec<String> {
        self.suggest_calls.lock().unwrap().clone()
    }

    fn geocode_calls(&self) -> Vec<(String, Option<String>)> {
        self.geocode_calls.lock().unwrap().clone()
    }
}

impl AddressBackend for ScriptedBackend {
    async fn suggest(&self, text: &str) -> Vec<Suggestion> {
        self.suggest_calls.lock().unwrap().push(text.to_owned());
        if let Some(delay) = self.suggest_delays.get(text) {
            tokio::time::sleep(*delay).await;
        }
        (1..=3)
            .map(|n| Suggestion {
                display_text: format!("{text} {n}"),
                disambiguation_key: Some(format!("key-{text}-{n}")),
            })
            .collect()
    }

    async fn geocode(
        &self,
        address: &str,
        magic_key: Option<&str>,
    ) -> Result<GeocodeResult, ArcgisError> {
        self.geocode_calls
            .lock()
            .unwrap()
            .push((address.to_owned(), magic_key.map(str::to_owned)));
        if let Some(delay) = self.geocode_delays.get(address) {
            tokio::time::sleep(*delay).await;
        }
        if self.unmatched.iter().any(|a| a == address) {
            return Err(ArcgisError::NoMatch);
        }
        Ok(GeocodeResult {
            label: format!("{address}, Stockholm"),
            longitude: 18.0649,
            latitude: 59.3327,
        })
    }

    async fn resolve_area(&self, _lon: f64, _lat: f64) -> Result<AreaResolution, ArcgisError> {
        if let Some(status) = self.area_status {
            return Err(ArcgisError::UnexpectedStatus {
                service: Service::FeatureServer,
                status,
            });
        }
        let mut attributes = AreaAttributes::default();
        attributes.insert("Deso", AttributeValue::Text("0180C1010".to_owned()));
        Ok(AreaResolution {
            attributes: Some(attributes),
            request_url: "https://example.test/FeatureServer/0/query?inSR=4326"
                .parse()
                .unwrap(),
        })
    }
}

fn session(backend: ScriptedBackend) -> (Session<ScriptedBackend>, Arc<ScriptedBackend>) {
    let backend = Arc::new(backend);
    (Session::new(Arc::clone(&backend), DEBOUNCE), backend)
}

/// Types `text` and waits for its suggestion list to land.
async fn type_and_wait(session: &mut Session<ScriptedBackend>, text: &str) {
    session.input(text);
    assert_eq!(session.next_completion().await, Applied::Suggestions(3));
}

#[tokio::test(start_paused = true)]
async fn short_input_never_fetches() {
    let (mut session, backend) = session(ScriptedBackend::default());
    session.input("Dr");
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(backend.suggest_calls().is_empty());
    assert!(!session.has_pending_work());
    assert!(!session.state().panel_visible());
}

#[tokio::test(start_paused = true)]
async fn shortening_input_cancels_the_pending_fetch() {
    let (mut session, backend) = session(ScriptedBackend::default());
    session.input("Drot");
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.input("Dr");
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(backend.suggest_calls().is_empty());
    assert!(!session.has_pending_work());
}

#[tokio::test(start_paused = true)]
async fn shortening_input_clears_a_shown_list() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;
    assert!(session.state().panel_visible());

    session.input("Dr");
    assert!(session.state().suggestions.is_empty());
    assert!(!session.state().panel_visible());
}

#[tokio::test(start_paused = true)]
async fn burst_of_keystrokes_fetches_once() {
    let (mut session, backend) = session(ScriptedBackend::default());
    for text in ["Dro", "Drot", "Drott"] {
        session.input(text);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(session.next_completion().await, Applied::Suggestions(3));

    assert_eq!(backend.suggest_calls(), vec!["Drott".to_owned()]);
    assert_eq!(session.state().suggestions[0].display_text, "Drott 1");
}

#[tokio::test(start_paused = true)]
async fn superseded_fetch_in_flight_is_aborted() {
    let backend = ScriptedBackend::default().slow_suggest("Drot", Duration::from_secs(1));
    let (mut session, backend) = session(backend);

    session.input("Drot");
    tokio::time::sleep(Duration::from_millis(300)).await;
    session.input("Drott");
    assert_eq!(session.next_completion().await, Applied::Suggestions(3));
    assert_eq!(session.state().suggestions[0].display_text, "Drott 1");

    let late = tokio::time::timeout(Duration::from_secs(5), session.next_completion()).await;
    assert!(late.is_err(), "aborted fetch must not report back");
    assert_eq!(
        backend.suggest_calls(),
        vec!["Drot".to_owned(), "Drott".to_owned()]
    );
}

#[tokio::test(start_paused = true)]
async fn queued_stale_suggestions_are_discarded() {
    let (mut session, _backend) = session(ScriptedBackend::default());

    session.input("Drot");
    // The fetch finishes but its completion is not applied yet.
    tokio::time::sleep(Duration::from_millis(300)).await;
    session.input("Drott");

    assert_eq!(session.next_completion().await, Applied::Discarded);
    assert!(session.state().suggestions.is_empty());
    assert_eq!(session.next_completion().await, Applied::Suggestions(3));
    assert_eq!(session.state().suggestions[0].display_text, "Drott 1");
}

#[tokio::test(start_paused = true)]
async fn arrow_keys_cycle_the_highlight() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;
    assert_eq!(session.state().highlight, None);

    let mut seen = Vec::new();
    for _ in 0..4 {
        assert_eq!(session.key(Key::ArrowDown), KeyOutcome::Consumed);
        seen.push(session.state().highlight);
    }
    assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(0)]);

    assert_eq!(session.key(Key::ArrowUp), KeyOutcome::Consumed);
    assert_eq!(session.state().highlight, Some(2));
}

#[tokio::test(start_paused = true)]
async fn arrow_up_without_highlight_selects_last() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;

    session.key(Key::ArrowUp);
    assert_eq!(session.state().highlight, Some(2));
}

#[tokio::test(start_paused = true)]
async fn enter_commits_the_highlighted_suggestion() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;

    session.key(Key::ArrowDown);
    session.key(Key::ArrowDown);
    assert_eq!(session.key(Key::Enter), KeyOutcome::Consumed);

    let state = session.state();
    assert_eq!(state.query, "Drot 2");
    assert_eq!(state.selected_key.as_deref(), Some("key-Drot-2"));
    assert!(!state.panel_visible());
    assert!(!state.loading, "a consumed Enter does not submit");
}

#[tokio::test(start_paused = true)]
async fn enter_without_highlight_passes_through() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;

    assert_eq!(session.key(Key::Enter), KeyOutcome::PassThrough);
    assert_eq!(session.state().query, "Drot");
}

#[tokio::test(start_paused = true)]
async fn keys_pass_through_while_panel_hidden() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    assert_eq!(session.key(Key::ArrowDown), KeyOutcome::PassThrough);
    assert_eq!(session.state().highlight, None);
}

#[tokio::test(start_paused = true)]
async fn escape_hides_and_focus_reopens() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;

    assert_eq!(session.key(Key::Escape), KeyOutcome::PassThrough);
    assert!(!session.state().panel_visible());
    assert_eq!(session.state().suggestions.len(), 3);

    session.handle(Event::Focus);
    assert!(session.state().panel_visible());
}

#[tokio::test(start_paused = true)]
async fn click_suggestion_commits_and_ignores_bad_index() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;

    session.handle(Event::ClickSuggestion(7));
    assert_eq!(session.state().query, "Drot");

    session.handle(Event::ClickSuggestion(0));
    assert_eq!(session.state().query, "Drot 1");
    assert_eq!(session.state().selected_key.as_deref(), Some("key-Drot-1"));
}

#[tokio::test(start_paused = true)]
async fn commit_cancels_fetch_for_edited_text() {
    let (mut session, backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;

    session.input("Drott");
    session.commit(1);
    assert!(!session.has_pending_work());

    let late = tokio::time::timeout(Duration::from_secs(5), session.next_completion()).await;
    assert!(late.is_err(), "cancelled fetch must not report back");
    assert_eq!(backend.suggest_calls(), vec!["Drot".to_owned()]);

    session.focus();
    assert_eq!(session.state().query, "Drot 2");
    assert_eq!(session.state().suggestions[0].display_text, "Drot 1");
}

#[tokio::test(start_paused = true)]
async fn editing_forgets_the_committed_key() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;
    session.commit(0);

    session.input("Drot 1x");
    assert_eq!(session.state().selected_key, None);
}

#[tokio::test(start_paused = true)]
async fn list_arriving_after_blur_stays_hidden() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    session.input("Drot");
    session.handle(Event::ClickOutside);

    assert_eq!(session.next_completion().await, Applied::Suggestions(3));
    assert!(!session.state().panel_visible());

    session.handle(Event::Focus);
    assert!(session.state().panel_visible());
}

#[tokio::test(start_paused = true)]
async fn focus_with_short_query_keeps_panel_closed() {
    let (mut session, _backend) = session(ScriptedBackend::default());
    session.input("Dr");
    session.focus();
    assert!(!session.state().panel_open);
}

#[tokio::test(start_paused = true)]
async fn empty_submit_changes_nothing() {
    let (mut session, backend) = session(ScriptedBackend::default());
    session.input("Drottninggatan 1");
    session.submit().unwrap();
    session.settle().await;
    let before = session.state().clone();

    session.input("  ");
    assert_eq!(session.submit(), Err(SubmitError::EmptyInput));

    assert_eq!(session.state().outcome, before.outcome);
    assert!(!session.state().loading);
    assert_eq!(backend.geocode_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn submit_runs_the_full_lookup() {
    let (mut session, backend) = session(ScriptedBackend::default());
    session.input("  Drottninggatan 1 ");
    session.submit().unwrap();
    assert!(session.state().loading);
    assert_eq!(session.state().submit_label(), "Searching…");

    session.settle().await;

    let state = session.state();
    assert!(!state.loading);
    assert_eq!(state.submit_label(), "Search");
    let result = state.result().expect("lookup result");
    assert_eq!(result.address.label, "Drottninggatan 1, Stockholm");
    assert!(result.attributes.is_some());
    assert!((result.debug.last_longitude - 18.0649).abs() < 1e-9);
    assert!((result.debug.last_latitude - 59.3327).abs() < 1e-9);
    assert!(result.debug.last_request_url.contains("inSR=4326"));
    assert!(!state.panel_visible(), "suggestions arriving after submit stay hidden");
    assert_eq!(
        backend.geocode_calls(),
        vec![("Drottninggatan 1".to_owned(), None)]
    );
}

#[tokio::test(start_paused = true)]
async fn pass_through_enter_submits_with_committed_key() {
    let (mut session, backend) = session(ScriptedBackend::default());
    type_and_wait(&mut session, "Drot").await;
    session.handle(Event::Key(Key::ArrowDown));
    session.handle(Event::Key(Key::Enter));
    assert!(!session.state().loading);

    session.handle(Event::Key(Key::Enter));
    assert!(session.state().loading);
    session.settle().await;

    assert_eq!(
        backend.geocode_calls(),
        vec![("Drot 1".to_owned(), Some("key-Drot-1".to_owned()))]
    );
    assert!(session.state().result().is_some());
}

#[tokio::test(start_paused = true)]
async fn geocode_failure_sets_error() {
    let (mut session, _backend) = session(ScriptedBackend::default().unmatched("Nowhere"));
    session.input("Nowhere");
    session.handle(Event::Submit);
    session.settle().await;

    let state = session.state();
    assert_eq!(state.error(), Some("No geocoding match for that address."));
    assert!(state.result().is_none());
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn area_failure_sets_error() {
    let (mut session, _backend) = session(ScriptedBackend::default().area_fails_with(502));
    session.input("Drottninggatan 1");
    session.submit().unwrap();
    session.settle().await;

    assert_eq!(session.state().error(), Some("FeatureServer HTTP 502"));
}

#[tokio::test(start_paused = true)]
async fn new_submit_clears_previous_outcome() {
    let (mut session, _backend) = session(ScriptedBackend::default().unmatched("Nowhere"));
    session.input("Nowhere");
    session.submit().unwrap();
    session.settle().await;
    assert!(session.state().error().is_some());

    session.input("Drottninggatan 1");
    session.submit().unwrap();
    assert_eq!(session.state().outcome, None);

    session.settle().await;
    assert!(session.state().result().is_some());
}

#[tokio::test(start_paused = true)]
async fn later_submit_supersedes_slow_run() {
    let backend = ScriptedBackend::default().slow_geocode("Slow street", Duration::from_secs(2));
    let (mut session, _backend) = session(backend);

    session.input("Slow street");
    session.submit().unwrap();
    session.input("Fast street");
    session.submit().unwrap();
    session.settle().await;

    let result = session.state().result().expect("lookup result");
    assert_eq!(result.address.label, "Fast street, Stockholm");

    let late = tokio::time::timeout(Duration::from_secs(5), session.next_completion()).await;
    assert!(late.is_err(), "aborted run must not report back");
    assert_eq!(
        session.state().result().map(|r| r.address.label.as_str()),
        Some("Fast street, Stockholm")
    );
}
