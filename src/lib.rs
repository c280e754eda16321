//! Vacuum Cache - A key-value cache server
//!
//! Serves cached values over HTTP with TTL expiry and write-triggered,
//! size-bounded vacuuming.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
