use crate::api;
use crate::error::ClientError;
use crate::traits::RecommendationBackend;
use async_trait::async_trait;
use movieflix_config::Config;
use movieflix_models::{FeedbackAction, HealthStatus, Movie, SuggestionItem, UserId};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct HttpBackend {
    client: Arc<Client>,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder().user_agent(concat!("movieflix/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Setup)?;

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        debug!("Using recommendation backend at {}", base_url);

        Ok(Self {
            client: Arc::new(client),
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(config.api_base(), config.api.timeout_secs.map(Duration::from_secs))
    }
}

#[async_trait]
impl RecommendationBackend for HttpBackend {
    fn backend_name(&self) -> &str {
        &self.base_url
    }

    async fn recommend_for_user(&self, user: UserId) -> Result<Vec<Movie>, ClientError> {
        api::get_recommendations(&self.client, &self.base_url, user).await
    }

    async fn recommend_by_title(&self, title: &str) -> Result<Vec<Movie>, ClientError> {
        api::get_similar_movies(&self.client, &self.base_url, title).await
    }

    async fn autocomplete(&self, query: &str) -> Result<Vec<SuggestionItem>, ClientError> {
        api::get_suggestions(&self.client, &self.base_url, query).await
    }

    async fn movie_details(&self, movie_id: u64) -> Result<Movie, ClientError> {
        api::get_movie(&self.client, &self.base_url, movie_id).await
    }

    async fn get_watchlist(&self, user: UserId) -> Result<Vec<Movie>, ClientError> {
        api::get_watchlist(&self.client, &self.base_url, user).await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        api::get_health(&self.client, &self.base_url).await
    }

    async fn send_feedback(&self, user: UserId, movie_id: u64, action: FeedbackAction) -> Result<(), ClientError> {
        api::post_feedback(&self.client, &self.base_url, user, movie_id, action).await
    }

    async fn add_to_watchlist(&self, user: UserId, movie_id: u64) -> Result<(), ClientError> {
        api::add_to_watchlist(&self.client, &self.base_url, user, movie_id).await
    }

    async fn remove_from_watchlist(&self, user: UserId, movie_id: u64) -> Result<(), ClientError> {
        api::remove_from_watchlist(&self.client, &self.base_url, user, movie_id).await
    }
}
