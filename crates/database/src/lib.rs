//! # Leaderboard Database Crate
//!
//! This crate is the leaderboard's interface to its libSQL store. It owns the
//! one connection the process uses and every SQL statement the program runs.
//!
//! ## Public API
//!
//! - `Store`: the single owned handle to the store, opened from a
//!   `<url>?authToken=<token>` connection string and closed on drop.
//! - `Target`: the parsed form of a connection string (remote server or local file).
//! - `DbRepository`: borrows a `Store` and provides the data access methods
//!   (`ensure_schema`, `insert_if_absent`, `get_leaderboard`).
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{Store, Target};
pub use error::DbError;
pub use repository::{DbRepository, InsertOutcome};
