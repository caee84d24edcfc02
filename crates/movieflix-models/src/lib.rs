pub mod feedback;
pub mod health;
pub mod movie;
pub mod suggestion;
pub mod user;
pub mod watchlist;

pub use feedback::FeedbackAction;
pub use health::HealthStatus;
pub use movie::Movie;
pub use suggestion::SuggestionItem;
pub use user::UserId;
pub use watchlist::WatchlistEntry;
