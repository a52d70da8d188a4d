//! SQLite storage implementation for the storefront.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `storefront-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations, including the reference currencies and languages
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!      core (domain)
//!            │
//!            ▼
//!   storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod catalog;
pub mod currencies;
pub mod dashboard;
pub mod languages;
pub mod products;
pub mod upcoming;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use catalog::CategoryRepository;
pub use currencies::CurrencyRepository;
pub use dashboard::DashboardRepository;
pub use languages::LanguageRepository;
pub use products::ProductRepository;
pub use upcoming::UpcomingProductRepository;
pub use users::UserRepository;

// Re-export from storefront-core for convenience
pub use storefront_core::errors::{DatabaseError, Error, Result};
