use crate::debounce::Debouncer;
use crate::highlight::HighlightedTitle;
use movieflix_client::{ClientError, RecommendationBackend};
use movieflix_config::SearchConfig;
use movieflix_models::SuggestionItem;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_len: 2,
        }
    }
}

impl From<&SearchConfig> for SuggestSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            min_query_len: config.min_query_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRow {
    pub title: HighlightedTitle,
    pub year: Option<String>,
}

impl SuggestionRow {
    fn new(item: SuggestionItem, query: &str) -> Self {
        Self {
            title: HighlightedTitle::new(&item.title, query),
            year: item.year,
        }
    }

    pub fn title(&self) -> &str {
        &self.title.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "rows", rename_all = "snake_case")]
pub enum Dropdown {
    #[default]
    Hidden,
    /// The "no movies found" row
    NoResults,
    Suggestions(Vec<SuggestionRow>),
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dropdown::Hidden)
    }
}

/// What a call to [`SuggestionController::step`] changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerUpdate {
    /// The debounce window elapsed and a lookup went out for this query
    LookupIssued(String),
    /// A lookup for this query settled and the dropdown was redrawn
    Rendered(String),
}

struct Lookup {
    seq: u64,
    query: String,
    result: Result<Vec<SuggestionItem>, ClientError>,
}

/// Autocomplete dropdown behind the search box.
///
/// Input events are plain method calls. Timer expiry and lookup completions
/// come back through [`SuggestionController::step`], which applies them one
/// at a time in the order they are delivered. Lookups are never cancelled
/// and their results are not checked against the current input, so a slow
/// response for an older query can replace a newer one on screen.
pub struct SuggestionController<B: RecommendationBackend + ?Sized + 'static> {
    backend: Arc<B>,
    settings: SuggestSettings,
    input: String,
    dropdown: Dropdown,
    debouncer: Debouncer<String>,
    lookups_tx: UnboundedSender<Lookup>,
    lookups_rx: UnboundedReceiver<Lookup>,
    issued: u64,
    in_flight: usize,
}

impl<B: RecommendationBackend + ?Sized + 'static> SuggestionController<B> {
    pub fn new(backend: Arc<B>, settings: SuggestSettings) -> Self {
        let (lookups_tx, lookups_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            debouncer: Debouncer::new(settings.debounce),
            settings,
            input: String::new(),
            dropdown: Dropdown::Hidden,
            lookups_tx,
            lookups_rx,
            issued: 0,
            in_flight: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn debounce_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn lookups_in_flight(&self) -> usize {
        self.in_flight
    }

    /// True while a timer is armed or a lookup has not come back yet.
    pub fn is_busy(&self) -> bool {
        self.debounce_pending() || self.in_flight > 0
    }

    fn query(&self) -> &str {
        self.input.trim()
    }

    fn query_is_long_enough(&self) -> bool {
        self.query().chars().count() >= self.settings.min_query_len
    }

    /// The search box now holds `value` (a keystroke, paste, or deletion).
    pub fn on_input(&mut self, value: impl Into<String>) {
        self.input = value.into();

        if !self.query_is_long_enough() {
            if self.debouncer.cancel() {
                debug!("Suggestion lookup cancelled, query too short");
            }
            self.dropdown = Dropdown::Hidden;
            return;
        }

        let query = self.query().to_string();
        self.debouncer.schedule(query);
    }

    /// Focus skips the debounce window entirely.
    pub fn on_focus(&mut self) {
        if self.query_is_long_enough() {
            let query = self.query().to_string();
            self.issue_lookup(query);
        }
    }

    /// A click that landed on neither the input nor the dropdown.
    pub fn on_click_outside(&mut self) {
        self.dropdown = Dropdown::Hidden;
    }

    /// Picks the row at `index`: its title replaces the input and the dropdown
    /// closes. Returns the title to run a full search with.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let title = match &self.dropdown {
            Dropdown::Suggestions(rows) => rows.get(index)?.title().to_string(),
            _ => return None,
        };

        // Setting the value is not a keystroke, and a stale timer must not reopen the dropdown
        self.debouncer.cancel();
        self.input = title.clone();
        self.dropdown = Dropdown::Hidden;
        Some(title)
    }

    /// Hides the dropdown without touching the input.
    pub fn hide(&mut self) {
        self.dropdown = Dropdown::Hidden;
    }

    /// Clears the input and closes the dropdown, as when returning to the home page.
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.input.clear();
        self.dropdown = Dropdown::Hidden;
    }

    /// Waits for the next timer expiry or lookup completion and applies it.
    /// Pending forever when neither can happen; check [`Self::is_busy`] first.
    pub async fn step(&mut self) -> ControllerUpdate {
        tokio::select! {
            query = self.debouncer.fired() => {
                self.issue_lookup(query.clone());
                ControllerUpdate::LookupIssued(query)
            }
            Some(lookup) = self.lookups_rx.recv() => {
                let query = lookup.query.clone();
                self.apply(lookup);
                ControllerUpdate::Rendered(query)
            }
        }
    }

    fn issue_lookup(&mut self, query: String) {
        self.issued += 1;
        self.in_flight += 1;
        let seq = self.issued;
        debug!(seq, query = %query, "Issuing suggestion lookup");

        let backend = Arc::clone(&self.backend);
        let tx = self.lookups_tx.clone();
        tokio::spawn(async move {
            let result = backend.autocomplete(&query).await;
            let _ = tx.send(Lookup { seq, query, result });
        });
    }

    fn apply(&mut self, lookup: Lookup) {
        self.in_flight = self.in_flight.saturating_sub(1);

        self.dropdown = match lookup.result {
            Ok(items) if items.is_empty() => Dropdown::NoResults,
            Ok(items) => {
                debug!(seq = lookup.seq, count = items.len(), "Suggestions received");
                Dropdown::Suggestions(
                    items
                        .into_iter()
                        .map(|item| SuggestionRow::new(item, &lookup.query))
                        .collect(),
                )
            }
            Err(e) => {
                debug!(seq = lookup.seq, query = %lookup.query, error = %e, "Suggestion lookup failed");
                Dropdown::Hidden
            }
        };
    }
}
