//! The lookup session: input debouncing, keyboard handling, and lookup runs.
//!
//! All state lives in [`FormState`] and changes only inside `&mut self`
//! handlers. Suggestion fetches and lookup runs execute in spawned tasks and
//! send a tagged [`Completion`] back; [`Session::next_completion`] applies it
//! if its ticket is still current and drops it otherwise.

use std::sync::Arc;
use std::time::Duration;

use deso_arcgis::ArcgisError;
use deso_core::widget_config::DEFAULT_CONTAINER_ID;
use deso_core::{LookupResult, Suggestion};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::backend::AddressBackend;
use crate::debounce::{Debouncer, TaskSlot};
use crate::keyboard::{next_highlight, previous_highlight, Key, KeyOutcome};
use crate::pipeline::{failure_message, run_lookup};
use crate::sequence::{SequenceGate, Ticket};
use crate::state::{FormState, Outcome};

/// Shortest query, in characters, that triggers a suggestion fetch.
pub const MIN_QUERY_CHARS: usize = 3;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(String),
    Focus,
    Blur,
    ClickOutside,
    ClickSuggestion(usize),
    Key(Key),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The query is blank; nothing was sent and nothing changed.
    #[error("nothing to look up")]
    EmptyInput,
}

/// What [`Session::next_completion`] did with the completion it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A fresh suggestion list with this many entries replaced the old one.
    Suggestions(usize),
    /// The latest lookup run finished and set the outcome.
    Lookup,
    /// The completion belonged to superseded work.
    Discarded,
}

enum Completion {
    Suggestions {
        ticket: Ticket,
        list: Vec<Suggestion>,
    },
    Lookup {
        ticket: Ticket,
        outcome: Result<LookupResult, ArcgisError>,
    },
}

pub struct Session<B> {
    backend: Arc<B>,
    container_id: String,
    state: FormState,
    suggest_seq: SequenceGate,
    lookup_seq: SequenceGate,
    debouncer: Debouncer,
    lookup_task: TaskSlot,
    /// Set when the panel is hidden after the latest fetch was scheduled, so
    /// the arriving list does not pop the panel back open.
    hidden_since_schedule: bool,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<B: AddressBackend> Session<B> {
    #[must_use]
    pub fn new(backend: Arc<B>, debounce: Duration) -> Self {
        Self::for_container(DEFAULT_CONTAINER_ID, backend, debounce)
    }

    /// Creates a session whose log lines are labelled with `container_id`.
    #[must_use]
    pub fn for_container(
        container_id: impl Into<String>,
        backend: Arc<B>,
        debounce: Duration,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            container_id: container_id.into(),
            state: FormState::default(),
            suggest_seq: SequenceGate::default(),
            lookup_seq: SequenceGate::default(),
            debouncer: Debouncer::new(debounce),
            lookup_task: TaskSlot::default(),
            hidden_since_schedule: false,
            completions_tx,
            completions_rx,
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// `true` while a suggestion fetch or lookup run may still change state.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.suggest_seq.is_outstanding() || self.lookup_seq.is_outstanding()
    }

    /// Dispatches one user interaction.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Input(text) => self.input(text),
            Event::Focus => self.focus(),
            Event::Blur | Event::ClickOutside => self.hide_panel(),
            Event::ClickSuggestion(index) => self.commit(index),
            Event::Key(key) => {
                if self.key(key) == KeyOutcome::PassThrough && key == Key::Enter {
                    self.submit_ignoring_empty();
                }
            }
            Event::Submit => self.submit_ignoring_empty(),
        }
    }

    /// Replaces the query text and (re)schedules a suggestion fetch.
    ///
    /// Any edit forgets the committed suggestion key and the highlight. Text
    /// shorter than [`MIN_QUERY_CHARS`] cancels pending fetches and clears
    /// the list instead.
    pub fn input(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.query.clone_from(&text);
        self.state.selected_key = None;
        self.state.highlight = None;

        if text.chars().count() < MIN_QUERY_CHARS {
            self.debouncer.cancel();
            self.suggest_seq.invalidate();
            self.state.suggestions.clear();
            self.state.panel_open = false;
            return;
        }

        let ticket = self.suggest_seq.issue();
        self.hidden_since_schedule = false;
        let backend = Arc::clone(&self.backend);
        let tx = self.completions_tx.clone();
        self.debouncer.schedule(async move {
            let list = backend.suggest(&text).await;
            if tx.send(Completion::Suggestions { ticket, list }).is_err() {
                tracing::debug!("session closed before suggestions arrived");
            }
        });
        tracing::debug!(
            container = %self.container_id,
            ?ticket,
            "suggestion fetch scheduled"
        );
    }

    /// Re-shows the panel when the query is long enough to have suggestions.
    pub fn focus(&mut self) {
        if self.state.query.chars().count() >= MIN_QUERY_CHARS {
            self.state.panel_open = true;
        }
    }

    pub fn hide_panel(&mut self) {
        self.state.panel_open = false;
        self.hidden_since_schedule = true;
    }

    /// Applies a keypress to the suggestion panel.
    ///
    /// Keys are only interpreted while the panel is visible; otherwise they
    /// pass through untouched.
    pub fn key(&mut self, key: Key) -> KeyOutcome {
        if !self.state.panel_visible() {
            return KeyOutcome::PassThrough;
        }
        let len = self.state.suggestions.len();
        match key {
            Key::ArrowDown => {
                self.state.highlight = next_highlight(self.state.highlight, len);
                KeyOutcome::Consumed
            }
            Key::ArrowUp => {
                self.state.highlight = previous_highlight(self.state.highlight, len);
                KeyOutcome::Consumed
            }
            Key::Enter => match self.state.highlight {
                Some(index) => {
                    self.commit(index);
                    KeyOutcome::Consumed
                }
                None => KeyOutcome::PassThrough,
            },
            Key::Escape => {
                self.hide_panel();
                KeyOutcome::PassThrough
            }
        }
    }

    /// Takes the suggestion at `index` as the query. Out-of-range indices
    /// are ignored. A fetch still pending for the edited text is cancelled.
    pub fn commit(&mut self, index: usize) {
        let Some(chosen) = self.state.suggestions.get(index).cloned() else {
            return;
        };
        self.debouncer.cancel();
        self.suggest_seq.invalidate();
        self.state.query = chosen.display_text;
        self.state.selected_key = chosen.disambiguation_key;
        self.hide_panel();
    }

    /// Starts a lookup run for the current query.
    ///
    /// Clears the previous result or error immediately and aborts any run
    /// still in flight; only this run may set the next outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::EmptyInput`] for a blank query, in which case
    /// no request is made and the state is left as it was.
    pub fn submit(&mut self) -> Result<Ticket, SubmitError> {
        let address = self.state.query.trim().to_owned();
        if address.is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        self.state.outcome = None;
        self.state.loading = true;
        self.hide_panel();

        let ticket = self.lookup_seq.issue();
        let magic_key = self.state.selected_key.clone();
        let backend = Arc::clone(&self.backend);
        let tx = self.completions_tx.clone();
        tracing::info!(
            container = %self.container_id,
            ?ticket,
            %address,
            with_key = magic_key.is_some(),
            "lookup started"
        );
        self.lookup_task.replace(async move {
            let outcome = run_lookup(backend.as_ref(), &address, magic_key.as_deref()).await;
            if tx.send(Completion::Lookup { ticket, outcome }).is_err() {
                tracing::debug!("session closed before lookup finished");
            }
        });
        Ok(ticket)
    }

    fn submit_ignoring_empty(&mut self) {
        if let Err(e) = self.submit() {
            tracing::debug!(container = %self.container_id, error = %e, "submit ignored");
        }
    }

    /// Waits for the next completion and applies it if still current.
    ///
    /// Cancel safe: if the returned future is dropped before it resolves, no
    /// completion is lost.
    pub async fn next_completion(&mut self) -> Applied {
        match self.completions_rx.recv().await {
            Some(completion) => self.apply(completion),
            // The session holds a sender, so the channel cannot close.
            None => Applied::Discarded,
        }
    }

    /// Applies completions until no fetch or run is outstanding.
    pub async fn settle(&mut self) {
        while self.has_pending_work() {
            self.next_completion().await;
        }
    }

    fn apply(&mut self, completion: Completion) -> Applied {
        match completion {
            Completion::Suggestions { ticket, list } => {
                if !self.suggest_seq.accept(ticket) {
                    tracing::debug!(container = %self.container_id, ?ticket, "stale suggestions dropped");
                    return Applied::Discarded;
                }
                let count = list.len();
                self.state.suggestions = list;
                self.state.highlight = None;
                self.state.panel_open = !self.hidden_since_schedule;
                Applied::Suggestions(count)
            }
            Completion::Lookup { ticket, outcome } => {
                if !self.lookup_seq.accept(ticket) {
                    tracing::debug!(container = %self.container_id, ?ticket, "stale lookup dropped");
                    return Applied::Discarded;
                }
                self.state.loading = false;
                self.state.outcome = Some(match outcome {
                    Ok(result) => {
                        tracing::info!(
                            container = %self.container_id,
                            label = %result.address.label,
                            matched = result.attributes.is_some(),
                            "lookup finished"
                        );
                        Outcome::Found(result)
                    }
                    Err(e) => {
                        tracing::warn!(container = %self.container_id, error = %e, "lookup failed");
                        Outcome::Failed(failure_message(&e))
                    }
                });
                Applied::Lookup
            }
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
