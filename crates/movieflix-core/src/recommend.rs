use crate::dispatch::{dispatch, Dispatched};
use crate::notify::Toast;
use crate::session::Session;
use crate::view::MoviesView;
use movieflix_client::{ClientError, RecommendationBackend};
use movieflix_models::{FeedbackAction, Movie};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub view: MoviesView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
}

/// Full searches, per-user recommendations, and like/dislike feedback.
pub struct Recommender<B: RecommendationBackend + ?Sized + 'static> {
    backend: Arc<B>,
}

impl<B: RecommendationBackend + ?Sized + 'static> Recommender<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Movies similar to `query`. Every failure ends in the "no results" view
    /// with an error toast; an empty query never reaches the backend.
    pub async fn search_by_title(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome {
                view: MoviesView::NoResults,
                toast: Some(Toast::error("Please enter a movie name")),
            };
        }

        match self.backend.recommend_by_title(query).await {
            Ok(movies) => {
                info!(query, count = movies.len(), "Search finished");
                SearchOutcome {
                    view: MoviesView::from_movies(movies),
                    toast: None,
                }
            }
            Err(e) => {
                warn!(query, error = %e, "Search failed");
                SearchOutcome {
                    view: MoviesView::NoResults,
                    toast: Some(Toast::error("Movie not found. Try another title.")),
                }
            }
        }
    }

    pub async fn recommend_for_user(&self, session: &Session) -> SearchOutcome {
        let user = session.user();
        match self.backend.recommend_for_user(user).await {
            Ok(movies) => SearchOutcome {
                view: MoviesView::from_movies(movies),
                toast: None,
            },
            Err(e) => {
                warn!(user = %user, error = %e, "Failed to load recommendations");
                SearchOutcome {
                    view: MoviesView::NoResults,
                    toast: Some(Toast::error("Could not load recommendations. Try again later.")),
                }
            }
        }
    }

    /// Sends a like/dislike without waiting; the toast always reports success.
    pub fn feedback(&self, session: &Session, movie_id: u64, action: FeedbackAction) -> (Toast, Dispatched) {
        let user = session.user();
        let backend = Arc::clone(&self.backend);
        let dispatched = dispatch("feedback", user, movie_id, async move { backend.send_feedback(user, movie_id, action).await });

        let toast = match action {
            FeedbackAction::Like => Toast::success("Added to your liked movies!"),
            FeedbackAction::Dislike => Toast::success("We'll show you fewer movies like this"),
        };
        (toast, dispatched)
    }

    pub async fn movie_details(&self, movie_id: u64) -> Result<Movie, ClientError> {
        self.backend.movie_details(movie_id).await
    }
}
