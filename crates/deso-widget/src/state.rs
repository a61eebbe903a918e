use deso_core::{LookupResult, Suggestion};

/// Final state of one lookup run. A run produces exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Found(LookupResult),
    Failed(String),
}

/// Everything the form displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub query: String,
    /// Key of the committed suggestion; cleared by any edit of `query`.
    pub selected_key: Option<String>,
    /// Server rank order.
    pub suggestions: Vec<Suggestion>,
    pub highlight: Option<usize>,
    /// Requested panel visibility; see [`FormState::panel_visible`].
    pub panel_open: bool,
    pub loading: bool,
    pub outcome: Option<Outcome>,
}

impl FormState {
    /// The panel is shown only when open and non-empty.
    #[must_use]
    pub fn panel_visible(&self) -> bool {
        self.panel_open && !self.suggestions.is_empty()
    }

    #[must_use]
    pub fn result(&self) -> Option<&LookupResult> {
        match &self.outcome {
            Some(Outcome::Found(result)) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Failed(message)) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Searching…"
        } else {
            "Search"
        }
    }
}
