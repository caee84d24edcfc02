pub mod api;
pub mod client;
pub mod error;
pub mod traits;

pub use client::HttpBackend;
pub use error::ClientError;
pub use traits::RecommendationBackend;
