use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

use super::{CategoryProductCount, DashboardRepositoryTrait, DashboardServiceTrait, DashboardStats};
use crate::constants::{
    DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_RECENT_LIMIT, DISPLAY_DECIMAL_PRECISION, MAX_PAGE_SIZE,
};
use crate::errors::ValidationError;
use crate::products::{ProductServiceTrait, ProductSummary};
use crate::Result;

pub struct DashboardService {
    repository: Arc<dyn DashboardRepositoryTrait>,
    product_service: Arc<dyn ProductServiceTrait>,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn DashboardRepositoryTrait>,
        product_service: Arc<dyn ProductServiceTrait>,
    ) -> Self {
        Self {
            repository,
            product_service,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_stats(&self) -> Result<DashboardStats> {
        let counts = self.repository.get_counts()?;
        let lines = self.repository.get_inventory_lines()?;

        let inventory_value: Decimal = lines
            .iter()
            .map(|l| l.price * Decimal::from(l.stock.max(0)))
            .sum();
        let average_price = if lines.is_empty() {
            Decimal::ZERO
        } else {
            let total: Decimal = lines.iter().map(|l| l.price).sum();
            (total / Decimal::from(lines.len() as i64)).round_dp_with_strategy(
                DISPLAY_DECIMAL_PRECISION,
                RoundingStrategy::MidpointAwayFromZero,
            )
        };

        Ok(DashboardStats {
            total_products: counts.total_products,
            active_products: counts.active_products,
            total_categories: counts.total_categories,
            total_upcoming: counts.total_upcoming,
            total_customers: counts.total_customers,
            inventory_value,
            average_price,
        })
    }

    fn get_products_per_category(&self) -> Result<Vec<CategoryProductCount>> {
        self.repository.get_products_per_category()
    }

    fn get_recent_products(&self, limit: Option<i64>) -> Result<Vec<ProductSummary>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT).clamp(1, MAX_PAGE_SIZE);
        let ids = self.repository.get_recent_product_ids(limit)?;
        self.product_service.get_summaries(&ids, None, None)
    }

    fn get_low_stock(&self, threshold: Option<i32>) -> Result<Vec<ProductSummary>> {
        let threshold = threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
        if threshold < 0 {
            return Err(ValidationError::InvalidInput(
                "Low stock threshold cannot be negative".to_string(),
            )
            .into());
        }
        let ids = self.repository.get_low_stock_product_ids(threshold)?;
        self.product_service.get_summaries(&ids, None, None)
    }
}
