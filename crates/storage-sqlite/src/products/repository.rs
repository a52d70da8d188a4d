//! Repository implementation for products.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use storefront_core::products::{
    NewProduct, Product, ProductFilter, ProductRepositoryTrait, ProductTranslation, ProductUpdate,
};
use storefront_core::utils::text_utils::slugify;
use storefront_core::Result;

use super::model::{ProductDB, ProductTranslationDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{product_translations, products};
use crate::utils::{chunk_for_sqlite, now_text};

pub struct ProductRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ProductRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

/// Escapes LIKE wildcards so the term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = products::table.into_boxed();

        if !filter.include_inactive {
            query = query.filter(products::is_active.eq(true));
        }
        if let Some(category_ids) = &filter.category_ids {
            query = query.filter(products::category_id.eq_any(category_ids.clone()));
        }
        if let Some(term) = &filter.search {
            // SQLite LIKE is case-insensitive for ASCII
            let pattern = like_pattern(term);
            let translated_matches = product_translations::table
                .filter(product_translations::name.like(pattern.clone()).escape('\\'))
                .select(product_translations::product_id);
            query = query.filter(
                products::slug
                    .like(pattern)
                    .escape('\\')
                    .or(products::id.eq_any(translated_matches)),
            );
        }

        let results = query
            .order((products::created_at.desc(), products::id.asc()))
            .load::<ProductDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Product::from).collect())
    }

    fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let mut conn = get_connection(&self.pool)?;
        let result = products::table
            .find(id)
            .first::<ProductDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(Product::from))
    }

    fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        let mut conn = get_connection(&self.pool)?;
        let result = products::table
            .filter(products::slug.eq(slug))
            .first::<ProductDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(Product::from))
    }

    fn get_products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;
        let mut all = Vec::with_capacity(ids.len());
        for chunk in chunk_for_sqlite(ids) {
            let results = products::table
                .filter(products::id.eq_any(chunk))
                .load::<ProductDB>(&mut conn)
                .map_err(StorageError::from)?;
            all.extend(results.into_iter().map(Product::from));
        }
        Ok(all)
    }

    fn get_translations(&self, product_ids: &[String]) -> Result<Vec<ProductTranslation>> {
        let mut conn = get_connection(&self.pool)?;
        let mut all = Vec::new();
        for chunk in chunk_for_sqlite(product_ids) {
            let results = product_translations::table
                .filter(product_translations::product_id.eq_any(chunk))
                .order((
                    product_translations::product_id.asc(),
                    product_translations::language_code.asc(),
                ))
                .load::<ProductTranslationDB>(&mut conn)
                .map_err(StorageError::from)?;
            all.extend(results.into_iter().map(ProductTranslation::from));
        }
        Ok(all)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Product> {
                let now = now_text();
                let id = product.id.unwrap_or_else(|| Uuid::new_v4().to_string());
                let slug = match product.slug {
                    Some(slug) => slug,
                    None => product
                        .translations
                        .first()
                        .map(|t| slugify(&t.name))
                        .unwrap_or_else(|| id.clone()),
                };
                let db = ProductDB {
                    id: id.clone(),
                    category_id: product.category_id,
                    slug,
                    price: product.price.to_string(),
                    image_url: product.image_url,
                    stock: product.stock,
                    is_active: product.is_active,
                    specifications: serde_json::to_string(&product.specifications)
                        .map_err(StorageError::from)?,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(products::table)
                    .values(&db)
                    .returning(ProductDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                let translations: Vec<ProductTranslationDB> = product
                    .translations
                    .into_iter()
                    .map(|t| ProductTranslationDB {
                        product_id: id.clone(),
                        ..ProductTranslationDB::from(t)
                    })
                    .collect();
                diesel::insert_into(product_translations::table)
                    .values(&translations)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Product::from(result))
            })
            .await
    }

    async fn update_product(&self, product: ProductUpdate) -> Result<Product> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Product> {
                let specifications =
                    serde_json::to_string(&product.specifications).map_err(StorageError::from)?;

                diesel::update(products::table.find(&product.id))
                    .set((
                        products::category_id.eq(&product.category_id),
                        products::slug.eq(&product.slug),
                        products::price.eq(product.price.to_string()),
                        products::image_url.eq(&product.image_url),
                        products::stock.eq(product.stock),
                        products::is_active.eq(product.is_active),
                        products::specifications.eq(specifications),
                        products::updated_at.eq(now_text()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result = products::table
                    .find(&product.id)
                    .first::<ProductDB>(conn)
                    .map_err(StorageError::from)?;

                Ok(Product::from(result))
            })
            .await
    }

    async fn delete_product(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(products::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn upsert_translation(
        &self,
        translation: ProductTranslation,
    ) -> Result<ProductTranslation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ProductTranslation> {
                let db = ProductTranslationDB::from(translation);

                let result = diesel::insert_into(product_translations::table)
                    .values(&db)
                    .on_conflict((
                        product_translations::product_id,
                        product_translations::language_code,
                    ))
                    .do_update()
                    .set((
                        product_translations::name.eq(&db.name),
                        product_translations::description.eq(&db.description),
                    ))
                    .returning(ProductTranslationDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(ProductTranslation::from(result))
            })
            .await
    }
}
