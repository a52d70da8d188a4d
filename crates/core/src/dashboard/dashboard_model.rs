use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub active_products: i64,
    pub total_categories: i64,
    pub total_upcoming: i64,
    pub total_customers: i64,
    /// Sum of price times stock over active products, base currency
    pub inventory_value: Decimal,
    /// Mean price of active products, base currency
    pub average_price: Decimal,
}

/// Raw row counts as returned by storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogCounts {
    pub total_products: i64,
    pub active_products: i64,
    pub total_categories: i64,
    pub total_upcoming: i64,
    pub total_customers: i64,
}

/// Price and stock of one active product
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryLine {
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProductCount {
    pub category_id: String,
    pub name: String,
    pub slug: String,
    pub product_count: i64,
}
