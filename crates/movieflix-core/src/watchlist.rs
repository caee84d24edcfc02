use crate::dispatch::{dispatch, Dispatched};
use crate::notify::Toast;
use crate::session::Session;
use crate::view::WatchlistView;
use movieflix_client::RecommendationBackend;
use movieflix_models::WatchlistEntry;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct AddOutcome {
    pub toast: Toast,
    /// The add command, still running. Only needed for logging.
    pub dispatched: Dispatched,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveOutcome {
    pub toast: Toast,
    /// Whether the backend accepted the remove
    pub confirmed: bool,
    /// The watchlist as reloaded after the remove settled
    pub view: WatchlistView,
}

/// Watchlist operations with optimistic local updates. The backend owns the
/// list; the session holds a best-effort mirror of it.
pub struct WatchlistClient<B: RecommendationBackend + ?Sized + 'static> {
    backend: Arc<B>,
}

impl<B: RecommendationBackend + ?Sized + 'static> WatchlistClient<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Adds to the local mirror, then sends the add command without waiting.
    /// The user always sees success.
    pub fn add(&self, session: &mut Session, entry: WatchlistEntry) -> AddOutcome {
        let user = session.user();
        let movie_id = entry.movie_id;
        let toast = Toast::success(format!("Added \"{}\" to your watchlist!", entry.title));

        session.push_entry(entry);
        debug!(user = %user, movie_id, "Watchlist entry added locally");

        let backend = Arc::clone(&self.backend);
        let dispatched = dispatch("watchlist_add", user, movie_id, async move { backend.add_to_watchlist(user, movie_id).await });

        AddOutcome { toast, dispatched }
    }

    /// Removes locally, waits for the remove command to settle either way,
    /// then reloads the authoritative list exactly once.
    pub async fn remove(&self, session: &mut Session, movie_id: u64) -> RemoveOutcome {
        let user = session.user();
        session.remove_entries(movie_id);

        let confirmed = match self.backend.remove_from_watchlist(user, movie_id).await {
            Ok(()) => {
                info!(user = %user, movie_id, "Removed from watchlist");
                true
            }
            Err(e) => {
                warn!(user = %user, movie_id, error = %e, "Watchlist remove failed");
                false
            }
        };

        let toast = if confirmed {
            Toast::success("Removed from watchlist")
        } else {
            Toast::success("Removed")
        };

        let view = self.load(session).await;
        RemoveOutcome { toast, confirmed, view }
    }

    /// Fetches the full list. On failure the empty view is shown and the
    /// local mirror is left as it was.
    pub async fn load(&self, session: &mut Session) -> WatchlistView {
        let user = session.user();
        match self.backend.get_watchlist(user).await {
            Ok(movies) => {
                debug!(user = %user, count = movies.len(), "Watchlist loaded");
                session.replace_watchlist(movies.iter().map(WatchlistEntry::from).collect());
                WatchlistView::from_movies(movies)
            }
            Err(e) => {
                warn!(user = %user, error = %e, "Failed to load watchlist; showing empty list");
                WatchlistView::Empty
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeBackend};
    use movieflix_models::{Movie, UserId};

    fn dune() -> WatchlistEntry {
        WatchlistEntry::new(42, "Dune", None)
    }

    fn reloads(backend: &FakeBackend) -> usize {
        backend.count(|c| matches!(c, Call::GetWatchlist(_)))
    }

    #[tokio::test]
    async fn test_add_is_visible_immediately_even_when_backend_rejects() {
        let backend = Arc::new(FakeBackend::new().failing_commands());
        let client = WatchlistClient::new(Arc::clone(&backend));
        let mut session = Session::start(UserId(1));

        let outcome = client.add(&mut session, dune());

        assert!(session.contains(42));
        assert_eq!(outcome.toast, Toast::success("Added \"Dune\" to your watchlist!"));

        assert!(!outcome.dispatched.settle().await);
        assert!(session.contains(42));
        assert_eq!(backend.calls(), vec![Call::Add(UserId(1), 42)]);
    }

    #[tokio::test]
    async fn test_add_success_settles_true() {
        let backend = Arc::new(FakeBackend::new());
        let client = WatchlistClient::new(Arc::clone(&backend));
        let mut session = Session::start(UserId(3));

        let outcome = client.add(&mut session, dune());
        assert_eq!(outcome.dispatched.label(), "watchlist_add");
        assert!(outcome.dispatched.settle().await);
        assert_eq!(backend.calls(), vec![Call::Add(UserId(3), 42)]);
    }

    #[tokio::test]
    async fn test_double_add_shows_duplicate_entries() {
        let backend = Arc::new(FakeBackend::new());
        let client = WatchlistClient::new(Arc::clone(&backend));
        let mut session = Session::start(UserId(1));

        let first = client.add(&mut session, dune());
        let second = client.add(&mut session, dune());
        first.dispatched.settle().await;
        second.dispatched.settle().await;

        assert_eq!(session.watchlist().len(), 2);
        assert_eq!(backend.count(|c| matches!(c, Call::Add(..))), 2);
    }

    #[tokio::test]
    async fn test_remove_reloads_once_on_success() {
        let backend = Arc::new(FakeBackend::new().with_watchlist(vec![Movie::new(7, "Heat", 4.2)]));
        let client = WatchlistClient::new(Arc::clone(&backend));
        let mut session = Session::start(UserId(1));
        client.add(&mut session, dune()).dispatched.settle().await;

        let outcome = client.remove(&mut session, 42).await;

        assert!(outcome.confirmed);
        assert_eq!(outcome.toast.message, "Removed from watchlist");
        assert_eq!(reloads(&backend), 1);
        assert_eq!(outcome.view.movies().len(), 1);
        assert!(!session.contains(42));
        assert!(session.contains(7));

        // The reload happens strictly after the remove
        let calls = backend.calls();
        assert_eq!(&calls[1..], &[Call::Remove(UserId(1), 42), Call::GetWatchlist(UserId(1))]);
    }

    #[tokio::test]
    async fn test_remove_reloads_once_on_failure() {
        let backend = Arc::new(FakeBackend::new().failing_commands().with_watchlist(vec![]));
        let client = WatchlistClient::new(Arc::clone(&backend));
        let mut session = Session::start(UserId(1));
        client.add(&mut session, dune()).dispatched.settle().await;

        let outcome = client.remove(&mut session, 42).await;

        assert!(!outcome.confirmed);
        assert_eq!(outcome.toast, Toast::success("Removed"));
        assert!(!outcome.toast.is_error());
        assert_eq!(reloads(&backend), 1);
        assert_eq!(outcome.view, WatchlistView::Empty);
        assert!(!session.contains(42));
    }

    #[tokio::test]
    async fn test_load_failure_shows_empty_and_keeps_mirror() {
        let backend = Arc::new(FakeBackend::new());
        let client = WatchlistClient::new(Arc::clone(&backend));
        let mut session = Session::start(UserId(1));
        client.add(&mut session, dune()).dispatched.settle().await;

        let view = client.load(&mut session).await;

        assert_eq!(view, WatchlistView::Empty);
        assert!(session.contains(42));
    }

    #[tokio::test]
    async fn test_load_replaces_mirror_with_server_state() {
        let backend = Arc::new(FakeBackend::new().with_watchlist(vec![
            Movie::new(1, "The Matrix", 4.5),
            Movie::new(2, "Inception", 4.8),
        ]));
        let client = WatchlistClient::new(Arc::clone(&backend));
        let mut session = Session::start(UserId(1));
        client.add(&mut session, dune()).dispatched.settle().await;

        let view = client.load(&mut session).await;

        assert_eq!(view.movies().len(), 2);
        let ids: Vec<u64> = session.watchlist().iter().map(|e| e.movie_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
