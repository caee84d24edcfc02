use movieflix_models::{UserId, WatchlistEntry};
use tracing::debug;

/// Per-session mutable state: the active user and the local watchlist mirror.
///
/// Created once when the session starts and handed to the components that
/// need it. Nothing is torn down explicitly.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: UserId,
    watchlist: Vec<WatchlistEntry>,
}

impl Session {
    pub fn start(user: UserId) -> Self {
        debug!("Session started for user {}", user);
        Self {
            user,
            watchlist: Vec::new(),
        }
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn watchlist(&self) -> &[WatchlistEntry] {
        &self.watchlist
    }

    pub fn contains(&self, movie_id: u64) -> bool {
        self.watchlist.iter().any(|e| e.movie_id == movie_id)
    }

    // No de-duplication: the same add twice yields two entries until the next reload
    pub(crate) fn push_entry(&mut self, entry: WatchlistEntry) {
        self.watchlist.push(entry);
    }

    pub(crate) fn remove_entries(&mut self, movie_id: u64) -> usize {
        let before = self.watchlist.len();
        self.watchlist.retain(|e| e.movie_id != movie_id);
        before - self.watchlist.len()
    }

    pub(crate) fn replace_watchlist(&mut self, entries: Vec<WatchlistEntry>) {
        self.watchlist = entries;
    }
}
