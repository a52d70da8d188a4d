//! Domain models for products.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product as stored: prices are in the base currency and names live in
/// translations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub category_id: String,
    pub slug: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub stock: i32,
    pub is_active: bool,
    /// Specification values keyed by specification label
    pub specifications: BTreeMap<String, String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Localized name and description of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTranslation {
    /// Filled from the owning product when omitted
    #[serde(default)]
    pub product_id: String,
    pub language_code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Data for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub id: Option<String>,
    pub category_id: String,
    /// Derived from the first translation's name when absent
    pub slug: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    /// `product_id` of each entry is ignored and replaced by the new id
    pub translations: Vec<ProductTranslation>,
}

fn default_true() -> bool {
    true
}

/// Data for updating an existing product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub id: String,
    pub category_id: String,
    pub slug: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub stock: i32,
    pub is_active: bool,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

/// Listing request as issued by a storefront page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<String>,
    #[serde(default)]
    pub include_subcategories: bool,
    pub search: Option<String>,
    pub language: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    #[serde(default)]
    pub sort: ProductSort,
    #[serde(default)]
    pub include_inactive: bool,
}

/// Storage-level filter derived from a `ProductQuery`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// `None` means every category
    pub category_ids: Option<Vec<String>>,
    /// Case-insensitive substring of a translated name or of the slug
    pub search: Option<String>,
    pub include_inactive: bool,
}

/// A product localized to one language and priced in one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub category_id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub language: String,
    /// Base-currency price
    pub price: Decimal,
    pub display_price: Decimal,
    pub currency: String,
    pub currency_symbol: String,
    pub image_url: Option<String>,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<ProductSummary>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSheetEntry {
    pub label: String,
    pub value: Option<String>,
}

/// One inherited specification group filled with the product's values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSheetGroup {
    pub group_id: String,
    pub title: String,
    pub entries: Vec<SpecSheetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub translations: Vec<ProductTranslation>,
    pub specifications: Vec<SpecSheetGroup>,
}
