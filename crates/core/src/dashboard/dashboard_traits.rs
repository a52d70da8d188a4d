use super::{CatalogCounts, CategoryProductCount, DashboardStats, InventoryLine};
use crate::products::ProductSummary;
use crate::Result;

pub trait DashboardRepositoryTrait: Send + Sync {
    fn get_counts(&self) -> Result<CatalogCounts>;
    fn get_inventory_lines(&self) -> Result<Vec<InventoryLine>>;
    /// Every category with its direct product count, including empty ones.
    fn get_products_per_category(&self) -> Result<Vec<CategoryProductCount>>;
    /// Newest product ids first.
    fn get_recent_product_ids(&self, limit: i64) -> Result<Vec<String>>;
    /// Active products with `stock <= threshold`, lowest stock first.
    fn get_low_stock_product_ids(&self, threshold: i32) -> Result<Vec<String>>;
}

pub trait DashboardServiceTrait: Send + Sync {
    fn get_stats(&self) -> Result<DashboardStats>;
    fn get_products_per_category(&self) -> Result<Vec<CategoryProductCount>>;
    fn get_recent_products(&self, limit: Option<i64>) -> Result<Vec<ProductSummary>>;
    fn get_low_stock(&self, threshold: Option<i32>) -> Result<Vec<ProductSummary>>;
}
