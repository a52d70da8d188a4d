//! Upcoming products - announced items with a release date.

mod upcoming_model;
mod upcoming_service;
mod upcoming_traits;

pub use upcoming_model::{NewUpcomingProduct, UpcomingProduct};
pub use upcoming_service::UpcomingProductService;
pub use upcoming_traits::{UpcomingProductRepositoryTrait, UpcomingProductServiceTrait};
