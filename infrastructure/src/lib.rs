// Module declarations
pub mod auth;
pub mod persistence;

// Re-export all implementations
pub use auth::InMemoryCredentialStore;
pub use persistence::InMemoryCollection;
