use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::Movie;

/// Local echo of a server-side (user, movie) watchlist association.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub movie_id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub added_at: DateTime<Utc>, // When this entry entered the local mirror
}

impl WatchlistEntry {
    pub fn new(movie_id: u64, title: impl Into<String>, poster: Option<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
            poster,
            added_at: Utc::now(),
        }
    }
}

impl From<&Movie> for WatchlistEntry {
    fn from(movie: &Movie) -> Self {
        Self::new(movie.id, movie.title.clone(), movie.poster.clone())
    }
}
