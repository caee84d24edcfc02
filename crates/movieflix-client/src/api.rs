use movieflix_models::{FeedbackAction, HealthStatus, Movie, SuggestionItem, UserId};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct RecommendationsResponse {
    recommendations: Option<Vec<Movie>>,
}

#[derive(Debug, Deserialize)]
struct SimilarMoviesResponse {
    similar_movies: Option<Vec<Movie>>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    suggestions: Option<Vec<SuggestionItem>>,
}

#[derive(Debug, Deserialize)]
struct WatchlistResponse {
    watchlist: Option<Vec<Movie>>,
}

#[derive(Debug, Serialize)]
struct WatchlistCommand {
    user_id: UserId,
    movie_id: u64,
}

#[derive(Debug, Serialize)]
struct FeedbackCommand {
    user_id: UserId,
    movie_id: u64,
    action: FeedbackAction,
}

/// Send a request and decode a 2xx JSON body
async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder, endpoint: &str) -> Result<T, ClientError> {
    let response = request
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ClientError::transport(endpoint, e))?;

    let status = response.status();
    let body = response.text().await.map_err(|e| ClientError::transport(endpoint, e))?;

    if !status.is_success() {
        return Err(ClientError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Send a command. The response body is not used.
async fn send_command(request: RequestBuilder, endpoint: &str) -> Result<(), ClientError> {
    let response = request.send().await.map_err(|e| ClientError::transport(endpoint, e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(())
}

fn required<T>(value: Option<T>, endpoint: &str, field: &'static str) -> Result<T, ClientError> {
    value.ok_or_else(|| ClientError::MissingField {
        endpoint: endpoint.to_string(),
        field,
    })
}

/// GET /api/recommend?user_id=ID
pub async fn get_recommendations(client: &Client, base_url: &str, user: UserId) -> Result<Vec<Movie>, ClientError> {
    let endpoint = "/api/recommend";
    let request = client
        .get(format!("{}{}", base_url, endpoint))
        .query(&[("user_id", user.0)]);

    let response: RecommendationsResponse = fetch_json(request, endpoint).await?;
    let movies = required(response.recommendations, endpoint, "recommendations")?;
    debug!("Received {} recommendations for user {}", movies.len(), user);
    Ok(movies)
}

/// GET /api/recommend_by_title?title=STR
pub async fn get_similar_movies(client: &Client, base_url: &str, title: &str) -> Result<Vec<Movie>, ClientError> {
    let endpoint = "/api/recommend_by_title";
    let request = client
        .get(format!("{}{}", base_url, endpoint))
        .query(&[("title", title)]);

    let response: SimilarMoviesResponse = fetch_json(request, endpoint).await?;
    let movies = required(response.similar_movies, endpoint, "similar_movies")?;
    debug!("Received {} movies similar to '{}'", movies.len(), title);
    Ok(movies)
}

/// GET /api/autocomplete?query=STR
pub async fn get_suggestions(client: &Client, base_url: &str, query: &str) -> Result<Vec<SuggestionItem>, ClientError> {
    let endpoint = "/api/autocomplete";
    let request = client
        .get(format!("{}{}", base_url, endpoint))
        .query(&[("query", query)]);

    let response: AutocompleteResponse = fetch_json(request, endpoint).await?;
    required(response.suggestions, endpoint, "suggestions")
}

/// GET /api/movie/:id
pub async fn get_movie(client: &Client, base_url: &str, movie_id: u64) -> Result<Movie, ClientError> {
    let endpoint = format!("/api/movie/{}", movie_id);
    let request = client.get(format!("{}{}", base_url, endpoint));
    fetch_json(request, &endpoint).await
}

/// GET /api/watchlist/:user_id
pub async fn get_watchlist(client: &Client, base_url: &str, user: UserId) -> Result<Vec<Movie>, ClientError> {
    let endpoint = format!("/api/watchlist/{}", user);
    let request = client.get(format!("{}{}", base_url, endpoint));

    let response: WatchlistResponse = fetch_json(request, &endpoint).await?;
    required(response.watchlist, &endpoint, "watchlist")
}

/// GET /health
pub async fn get_health(client: &Client, base_url: &str) -> Result<HealthStatus, ClientError> {
    let endpoint = "/health";
    fetch_json(client.get(format!("{}{}", base_url, endpoint)), endpoint).await
}

/// POST /api/feedback
pub async fn post_feedback(
    client: &Client,
    base_url: &str,
    user: UserId,
    movie_id: u64,
    action: FeedbackAction,
) -> Result<(), ClientError> {
    let endpoint = "/api/feedback";
    let request = client
        .post(format!("{}{}", base_url, endpoint))
        .json(&FeedbackCommand {
            user_id: user,
            movie_id,
            action,
        });
    send_command(request, endpoint).await
}

/// POST /api/watchlist/add
pub async fn add_to_watchlist(client: &Client, base_url: &str, user: UserId, movie_id: u64) -> Result<(), ClientError> {
    let endpoint = "/api/watchlist/add";
    let request = client
        .post(format!("{}{}", base_url, endpoint))
        .json(&WatchlistCommand { user_id: user, movie_id });
    send_command(request, endpoint).await
}

/// DELETE /api/watchlist/remove (JSON body, not a path parameter)
pub async fn remove_from_watchlist(client: &Client, base_url: &str, user: UserId, movie_id: u64) -> Result<(), ClientError> {
    let endpoint = "/api/watchlist/remove";
    let request = client
        .delete(format!("{}{}", base_url, endpoint))
        .json(&WatchlistCommand { user_id: user, movie_id });
    send_command(request, endpoint).await
}
