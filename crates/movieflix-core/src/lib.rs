pub mod debounce;
pub mod dispatch;
pub mod highlight;
pub mod notify;
pub mod recommend;
pub mod session;
pub mod suggest;
pub mod view;
pub mod watchlist;

#[cfg(test)]
pub(crate) mod testing;

pub use debounce::Debouncer;
pub use dispatch::Dispatched;
pub use highlight::HighlightedTitle;
pub use notify::{Toast, ToastKind};
pub use recommend::{Recommender, SearchOutcome};
pub use session::Session;
pub use suggest::{ControllerUpdate, Dropdown, SuggestSettings, SuggestionController, SuggestionRow};
pub use view::{MoviesView, WatchlistView};
pub use watchlist::{AddOutcome, RemoveOutcome, WatchlistClient};
