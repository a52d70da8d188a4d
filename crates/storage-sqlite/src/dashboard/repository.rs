//! Read-only aggregate queries for the admin dashboard.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;

use storefront_core::dashboard::{
    CatalogCounts, CategoryProductCount, DashboardRepositoryTrait, InventoryLine,
};
use storefront_core::users::UserRole;
use storefront_core::Result;

use crate::catalog::CategoryDB;
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::{categories, products, upcoming_products, users};
use crate::utils::text_to_decimal;

pub struct DashboardRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl DashboardRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl DashboardRepositoryTrait for DashboardRepository {
    fn get_counts(&self) -> Result<CatalogCounts> {
        let mut conn = get_connection(&self.pool)?;

        let total_products = products::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let active_products = products::table
            .filter(products::is_active.eq(true))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let total_categories = categories::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let total_upcoming = upcoming_products::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let total_customers = users::table
            .filter(users::role.eq(UserRole::Customer.as_str()))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(CatalogCounts {
            total_products,
            active_products,
            total_categories,
            total_upcoming,
            total_customers,
        })
    }

    fn get_inventory_lines(&self) -> Result<Vec<InventoryLine>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = products::table
            .filter(products::is_active.eq(true))
            .select((products::price, products::stock))
            .load::<(String, i32)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(price, stock)| InventoryLine {
                price: text_to_decimal(&price),
                stock,
            })
            .collect())
    }

    fn get_products_per_category(&self) -> Result<Vec<CategoryProductCount>> {
        let mut conn = get_connection(&self.pool)?;
        let all_categories = categories::table
            .order((categories::sort_order.asc(), categories::name.asc()))
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        let counts: HashMap<String, i64> = products::table
            .group_by(products::category_id)
            .select((products::category_id, count_star()))
            .load::<(String, i64)>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .collect();

        Ok(all_categories
            .into_iter()
            .map(|c| CategoryProductCount {
                product_count: counts.get(&c.id).copied().unwrap_or(0),
                category_id: c.id,
                name: c.name,
                slug: c.slug,
            })
            .collect())
    }

    fn get_recent_product_ids(&self, limit: i64) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(products::table
            .order((products::created_at.desc(), products::id.asc()))
            .limit(limit)
            .select(products::id)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?)
    }

    fn get_low_stock_product_ids(&self, threshold: i32) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(products::table
            .filter(products::is_active.eq(true))
            .filter(products::stock.le(threshold))
            .order((products::stock.asc(), products::id.asc()))
            .select(products::id)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?)
    }
}
