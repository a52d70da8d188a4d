use async_trait::async_trait;
use chrono::NaiveDate;

use super::{NewUpcomingProduct, UpcomingProduct};
use crate::Result;

#[async_trait]
pub trait UpcomingProductRepositoryTrait: Send + Sync {
    /// Items releasing on or after `date`, earliest first.
    fn get_upcoming_from(&self, date: NaiveDate) -> Result<Vec<UpcomingProduct>>;
    fn get_all(&self) -> Result<Vec<UpcomingProduct>>;
    fn get_upcoming_product(&self, id: &str) -> Result<Option<UpcomingProduct>>;
    async fn create_upcoming_product(&self, item: NewUpcomingProduct) -> Result<UpcomingProduct>;
    async fn update_upcoming_product(&self, item: UpcomingProduct) -> Result<UpcomingProduct>;
    async fn delete_upcoming_product(&self, id: &str) -> Result<usize>;
}

#[async_trait]
pub trait UpcomingProductServiceTrait: Send + Sync {
    /// Items whose release date is `today` or later, earliest first.
    fn get_upcoming_products(&self, today: NaiveDate) -> Result<Vec<UpcomingProduct>>;
    /// Every item including already released ones, for administration.
    fn get_all_upcoming_products(&self) -> Result<Vec<UpcomingProduct>>;
    fn get_upcoming_product(&self, id: &str) -> Result<Option<UpcomingProduct>>;
    async fn create_upcoming_product(&self, item: NewUpcomingProduct) -> Result<UpcomingProduct>;
    async fn update_upcoming_product(&self, item: UpcomingProduct) -> Result<UpcomingProduct>;
    async fn delete_upcoming_product(&self, id: &str) -> Result<usize>;
}
