//! Storage layer for the Action Scout CLI
//!
//! A small SQLite database that remembers which teams the user is tracking:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Watchlist operations

pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::WatchlistDb;
