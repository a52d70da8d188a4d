use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use super::{
    NewUpcomingProduct, UpcomingProduct, UpcomingProductRepositoryTrait,
    UpcomingProductServiceTrait,
};
use crate::errors::{DatabaseError, ValidationError};
use crate::Result;

pub struct UpcomingProductService {
    repository: Arc<dyn UpcomingProductRepositoryTrait>,
}

impl UpcomingProductService {
    pub fn new(repository: Arc<dyn UpcomingProductRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn clean_name(name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(name.to_string())
    }
}

#[async_trait]
impl UpcomingProductServiceTrait for UpcomingProductService {
    fn get_upcoming_products(&self, today: NaiveDate) -> Result<Vec<UpcomingProduct>> {
        let mut items = self.repository.get_upcoming_from(today)?;
        items.retain(|item| item.release_date >= today);
        items.sort_by(|a, b| {
            a.release_date
                .cmp(&b.release_date)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(items)
    }

    fn get_all_upcoming_products(&self) -> Result<Vec<UpcomingProduct>> {
        self.repository.get_all()
    }

    fn get_upcoming_product(&self, id: &str) -> Result<Option<UpcomingProduct>> {
        self.repository.get_upcoming_product(id)
    }

    async fn create_upcoming_product(&self, item: NewUpcomingProduct) -> Result<UpcomingProduct> {
        let name = Self::clean_name(&item.name)?;
        self.repository
            .create_upcoming_product(NewUpcomingProduct { name, ..item })
            .await
    }

    async fn update_upcoming_product(&self, item: UpcomingProduct) -> Result<UpcomingProduct> {
        let name = Self::clean_name(&item.name)?;
        if self.repository.get_upcoming_product(&item.id)?.is_none() {
            return Err(DatabaseError::NotFound(format!("Upcoming product '{}'", item.id)).into());
        }
        self.repository
            .update_upcoming_product(UpcomingProduct { name, ..item })
            .await
    }

    async fn delete_upcoming_product(&self, id: &str) -> Result<usize> {
        self.repository.delete_upcoming_product(id).await
    }
}
