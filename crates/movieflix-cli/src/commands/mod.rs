pub mod browse;
pub mod config;
pub mod health;
pub mod suggest;
pub mod watchlist;
