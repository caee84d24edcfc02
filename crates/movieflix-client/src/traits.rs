use async_trait::async_trait;
use movieflix_models::{FeedbackAction, HealthStatus, Movie, SuggestionItem, UserId};

use crate::error::ClientError;

/// The recommendation service as seen by the client. Query methods return
/// data; command methods only report whether the backend accepted them.
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Human-readable location of the backend, used in log lines
    fn backend_name(&self) -> &str;

    // Queries
    async fn recommend_for_user(&self, user: UserId) -> Result<Vec<Movie>, ClientError>;
    async fn recommend_by_title(&self, title: &str) -> Result<Vec<Movie>, ClientError>;
    async fn autocomplete(&self, query: &str) -> Result<Vec<SuggestionItem>, ClientError>;
    async fn movie_details(&self, movie_id: u64) -> Result<Movie, ClientError>;
    async fn get_watchlist(&self, user: UserId) -> Result<Vec<Movie>, ClientError>;
    async fn health(&self) -> Result<HealthStatus, ClientError>;

    // Commands
    async fn send_feedback(&self, user: UserId, movie_id: u64, action: FeedbackAction) -> Result<(), ClientError>;
    async fn add_to_watchlist(&self, user: UserId, movie_id: u64) -> Result<(), ClientError>;
    async fn remove_from_watchlist(&self, user: UserId, movie_id: u64) -> Result<(), ClientError>;
}
