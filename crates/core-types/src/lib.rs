pub mod user;

// Re-export the core types to provide a clean public API.
pub use user::User;
