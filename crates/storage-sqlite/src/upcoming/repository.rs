use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use storefront_core::upcoming::{
    NewUpcomingProduct, UpcomingProduct, UpcomingProductRepositoryTrait,
};
use storefront_core::Result;

use super::model::UpcomingProductDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::upcoming_products;
use crate::utils::{date_to_text, now_text};

pub struct UpcomingProductRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UpcomingProductRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UpcomingProductRepositoryTrait for UpcomingProductRepository {
    fn get_upcoming_from(&self, date: NaiveDate) -> Result<Vec<UpcomingProduct>> {
        let mut conn = get_connection(&self.pool)?;
        // ISO dates compare correctly as text
        let results = upcoming_products::table
            .filter(upcoming_products::release_date.ge(date_to_text(&date)))
            .order((
                upcoming_products::release_date.asc(),
                upcoming_products::name.asc(),
            ))
            .load::<UpcomingProductDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(UpcomingProduct::from).collect())
    }

    fn get_all(&self) -> Result<Vec<UpcomingProduct>> {
        let mut conn = get_connection(&self.pool)?;
        let results = upcoming_products::table
            .order(upcoming_products::release_date.desc())
            .load::<UpcomingProductDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(UpcomingProduct::from).collect())
    }

    fn get_upcoming_product(&self, id: &str) -> Result<Option<UpcomingProduct>> {
        let mut conn = get_connection(&self.pool)?;
        let result = upcoming_products::table
            .find(id)
            .first::<UpcomingProductDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(UpcomingProduct::from))
    }

    async fn create_upcoming_product(&self, item: NewUpcomingProduct) -> Result<UpcomingProduct> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UpcomingProduct> {
                let now = now_text();
                let db = UpcomingProductDB {
                    id: item.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: item.name,
                    description: item.description,
                    image_url: item.image_url,
                    category_id: item.category_id,
                    release_date: date_to_text(&item.release_date),
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(upcoming_products::table)
                    .values(&db)
                    .returning(UpcomingProductDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(UpcomingProduct::from(result))
            })
            .await
    }

    async fn update_upcoming_product(&self, item: UpcomingProduct) -> Result<UpcomingProduct> {
        let id = item.id.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UpcomingProduct> {
                let mut db = UpcomingProductDB::from(item);
                db.updated_at = now_text();

                diesel::update(upcoming_products::table.find(&id))
                    .set((
                        upcoming_products::name.eq(&db.name),
                        upcoming_products::description.eq(&db.description),
                        upcoming_products::image_url.eq(&db.image_url),
                        upcoming_products::category_id.eq(&db.category_id),
                        upcoming_products::release_date.eq(&db.release_date),
                        upcoming_products::updated_at.eq(&db.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result = upcoming_products::table
                    .find(&id)
                    .first::<UpcomingProductDB>(conn)
                    .map_err(StorageError::from)?;

                Ok(UpcomingProduct::from(result))
            })
            .await
    }

    async fn delete_upcoming_product(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(upcoming_products::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
