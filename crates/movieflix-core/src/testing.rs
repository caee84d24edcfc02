use async_trait::async_trait;
use movieflix_client::{ClientError, RecommendationBackend};
use movieflix_models::{FeedbackAction, HealthStatus, Movie, SuggestionItem, UserId};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RecommendForUser(UserId),
    RecommendByTitle(String),
    Autocomplete(String),
    MovieDetails(u64),
    GetWatchlist(UserId),
    Health,
    Feedback(UserId, u64, FeedbackAction),
    Add(UserId, u64),
    Remove(UserId, u64),
}

/// In-memory backend that records every call. Anything not configured fails
/// with a 500.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    suggestions: HashMap<String, (Vec<SuggestionItem>, Duration)>,
    similar: HashMap<String, Vec<Movie>>,
    recommendations: Option<Vec<Movie>>,
    watchlist: Option<Vec<Movie>>,
    commands_fail: bool,
}

fn server_error(endpoint: &str) -> ClientError {
    ClientError::Status {
        endpoint: endpoint.to_string(),
        status: 500,
        body: "fake backend".to_string(),
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suggestions(self, query: &str, titles: &[&str]) -> Self {
        self.with_slow_suggestions(query, titles, Duration::ZERO)
    }

    pub fn with_slow_suggestions(mut self, query: &str, titles: &[&str], latency: Duration) -> Self {
        let items = titles.iter().map(|t| SuggestionItem::new(*t, None)).collect();
        self.suggestions.insert(query.to_string(), (items, latency));
        self
    }

    pub fn with_similar(mut self, title: &str, movies: Vec<Movie>) -> Self {
        self.similar.insert(title.to_string(), movies);
        self
    }

    pub fn with_recommendations(mut self, movies: Vec<Movie>) -> Self {
        self.recommendations = Some(movies);
        self
    }

    pub fn with_watchlist(mut self, movies: Vec<Movie>) -> Self {
        self.watchlist = Some(movies);
        self
    }

    pub fn failing_commands(mut self) -> Self {
        self.commands_fail = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn autocomplete_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Autocomplete(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn command_result(&self, endpoint: &str) -> Result<(), ClientError> {
        if self.commands_fail {
            Err(server_error(endpoint))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecommendationBackend for FakeBackend {
    fn backend_name(&self) -> &str {
        "fake"
    }

    async fn recommend_for_user(&self, user: UserId) -> Result<Vec<Movie>, ClientError> {
        self.record(Call::RecommendForUser(user));
        self.recommendations.clone().ok_or_else(|| server_error("/api/recommend"))
    }

    async fn recommend_by_title(&self, title: &str) -> Result<Vec<Movie>, ClientError> {
        self.record(Call::RecommendByTitle(title.to_string()));
        self.similar.get(title).cloned().ok_or_else(|| ClientError::Status {
            endpoint: "/api/recommend_by_title".to_string(),
            status: 404,
            body: r#"{"error": "Movie not found"}"#.to_string(),
        })
    }

    async fn autocomplete(&self, query: &str) -> Result<Vec<SuggestionItem>, ClientError> {
        self.record(Call::Autocomplete(query.to_string()));
        let (items, latency) = self
            .suggestions
            .get(query)
            .cloned()
            .ok_or_else(|| server_error("/api/autocomplete"))?;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok(items)
    }

    async fn movie_details(&self, movie_id: u64) -> Result<Movie, ClientError> {
        self.record(Call::MovieDetails(movie_id));
        Err(server_error("/api/movie"))
    }

    async fn get_watchlist(&self, user: UserId) -> Result<Vec<Movie>, ClientError> {
        self.record(Call::GetWatchlist(user));
        self.watchlist.clone().ok_or_else(|| server_error("/api/watchlist"))
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.record(Call::Health);
        Err(server_error("/health"))
    }

    async fn send_feedback(&self, user: UserId, movie_id: u64, action: FeedbackAction) -> Result<(), ClientError> {
        self.record(Call::Feedback(user, movie_id, action));
        self.command_result("/api/feedback")
    }

    async fn add_to_watchlist(&self, user: UserId, movie_id: u64) -> Result<(), ClientError> {
        self.record(Call::Add(user, movie_id));
        self.command_result("/api/watchlist/add")
    }

    async fn remove_from_watchlist(&self, user: UserId, movie_id: u64) -> Result<(), ClientError> {
        self.record(Call::Remove(user, movie_id));
        self.command_result("/api/watchlist/remove")
    }
}

/// Formatted log output collected in memory.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes `debug` and above on this thread into the buffer until the guard drops.
    /// Use with the current-thread test runtime so spawned tasks are covered too.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || logs.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
