//! Storefront Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the storefront: the catalog
//! (categories, specification groups and their inheritance), products,
//! upcoming releases, currencies, languages, the cart reducer, dashboard
//! statistics and user accounts.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod cart;
pub mod catalog;
pub mod constants;
pub mod currencies;
pub mod dashboard;
pub mod errors;
pub mod languages;
pub mod products;
pub mod upcoming;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
