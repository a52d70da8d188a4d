//! Dashboard module - catalog statistics for administrators.

mod dashboard_model;
mod dashboard_service;
mod dashboard_traits;

pub use dashboard_model::{CatalogCounts, CategoryProductCount, DashboardStats, InventoryLine};
pub use dashboard_service::DashboardService;
pub use dashboard_traits::{DashboardRepositoryTrait, DashboardServiceTrait};
