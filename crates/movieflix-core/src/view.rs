use movieflix_models::Movie;
use serde::Serialize;

/// What the recommendations page shows after a load settles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "movies", rename_all = "snake_case")]
pub enum MoviesView {
    Movies(Vec<Movie>),
    NoResults,
}

impl MoviesView {
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        if movies.is_empty() {
            MoviesView::NoResults
        } else {
            MoviesView::Movies(movies)
        }
    }

    pub fn movies(&self) -> &[Movie] {
        match self {
            MoviesView::Movies(movies) => movies,
            MoviesView::NoResults => &[],
        }
    }
}

/// What the watchlist page shows after a load settles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "movies", rename_all = "snake_case")]
pub enum WatchlistView {
    Movies(Vec<Movie>),
    Empty,
}

impl WatchlistView {
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        if movies.is_empty() {
            WatchlistView::Empty
        } else {
            WatchlistView::Movies(movies)
        }
    }

    pub fn movies(&self) -> &[Movie] {
        match self {
            WatchlistView::Movies(movies) => movies,
            WatchlistView::Empty => &[],
        }
    }
}
