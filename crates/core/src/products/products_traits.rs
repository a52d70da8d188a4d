//! Traits for product repository and service.

use async_trait::async_trait;

use super::{
    NewProduct, Product, ProductDetail, ProductFilter, ProductPage, ProductQuery, ProductSummary,
    ProductTranslation, ProductUpdate,
};
use crate::currencies::Currency;
use crate::Result;

/// Repository trait for product persistence operations.
#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    /// Products matching the filter, newest first.
    fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>>;
    fn get_product(&self, id: &str) -> Result<Option<Product>>;
    fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>>;
    fn get_products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>>;
    fn get_translations(&self, product_ids: &[String]) -> Result<Vec<ProductTranslation>>;
    /// Inserts the product and its translations in one transaction.
    async fn create_product(&self, product: NewProduct) -> Result<Product>;
    async fn update_product(&self, product: ProductUpdate) -> Result<Product>;
    async fn delete_product(&self, id: &str) -> Result<usize>;
    async fn upsert_translation(&self, translation: ProductTranslation)
        -> Result<ProductTranslation>;
}

/// Service trait for product browsing and administration.
#[async_trait]
pub trait ProductServiceTrait: Send + Sync {
    fn search_products(
        &self,
        query: ProductQuery,
        currency: Option<&Currency>,
    ) -> Result<ProductPage>;
    fn get_product(
        &self,
        id_or_slug: &str,
        language: Option<&str>,
        currency: Option<&Currency>,
    ) -> Result<ProductDetail>;
    /// Summaries for the given ids, in the order of `ids`; unknown ids are skipped.
    fn get_summaries(
        &self,
        ids: &[String],
        language: Option<&str>,
        currency: Option<&Currency>,
    ) -> Result<Vec<ProductSummary>>;
    async fn create_product(&self, product: NewProduct) -> Result<Product>;
    async fn update_product(&self, product: ProductUpdate) -> Result<Product>;
    async fn delete_product(&self, id: &str) -> Result<usize>;
    async fn upsert_translation(&self, translation: ProductTranslation)
        -> Result<ProductTranslation>;
}
