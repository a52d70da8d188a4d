//! Repository implementation for the catalog.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use storefront_core::catalog::{
    Category, CategoryRepositoryTrait, CategorySpecGroup, CategorySpecLevel, NewCategory,
    NewSpecGroup, SpecGroup,
};
use storefront_core::utils::text_utils::slugify;
use storefront_core::Result;

use super::model::{CategoryDB, CategorySpecGroupDB, NewCategoryDB, SpecGroupDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{categories, category_spec_groups, products, spec_groups};
use crate::utils::{datetime_to_text, now_text};

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let results = categories::table
            .order((categories::sort_order.asc(), categories::name.asc()))
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Category::from).collect())
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let result = categories::table
            .find(id)
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(Category::from))
    }

    fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let result = categories::table
            .filter(categories::slug.eq(slug))
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(Category::from))
    }

    fn get_children(&self, parent_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let results = categories::table
            .filter(categories::parent_id.eq(parent_id))
            .order((categories::sort_order.asc(), categories::name.asc()))
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Category::from).collect())
    }

    fn count_category_products(&self, category_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(products::table
            .filter(products::category_id.eq(category_id))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let now = now_text();
                let db = NewCategoryDB {
                    id: category.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    slug: category
                        .slug
                        .unwrap_or_else(|| slugify(&category.name)),
                    parent_id: category.parent_id,
                    name: category.name,
                    description: category.description,
                    sort_order: category.sort_order,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(categories::table)
                    .values(&db)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(Category::from(result))
            })
            .await
    }

    async fn update_category(&self, category: Category) -> Result<Category> {
        let id = category.id.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let mut db = CategoryDB::from(category);
                db.updated_at = now_text();

                diesel::update(categories::table.find(&id))
                    .set(&db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result = categories::table
                    .find(&id)
                    .first::<CategoryDB>(conn)
                    .map_err(StorageError::from)?;

                Ok(Category::from(result))
            })
            .await
    }

    async fn delete_category(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(categories::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_spec_level(&self, category_id: &str) -> Result<Option<CategorySpecLevel>> {
        let mut conn = get_connection(&self.pool)?;
        let Some(category) = categories::table
            .find(category_id)
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
        else {
            return Ok(None);
        };

        let groups = category_spec_groups::table
            .inner_join(spec_groups::table)
            .filter(category_spec_groups::category_id.eq(category_id))
            .order((
                category_spec_groups::sort_order.asc(),
                spec_groups::title.asc(),
            ))
            .select(SpecGroupDB::as_select())
            .load::<SpecGroupDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(Some(CategorySpecLevel {
            category_id: category.id,
            parent_id: category.parent_id,
            spec_groups: groups.into_iter().map(SpecGroup::from).collect(),
        }))
    }

    fn get_spec_groups(&self) -> Result<Vec<SpecGroup>> {
        let mut conn = get_connection(&self.pool)?;
        let results = spec_groups::table
            .order(spec_groups::title.asc())
            .load::<SpecGroupDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(SpecGroup::from).collect())
    }

    fn get_spec_group(&self, id: &str) -> Result<Option<SpecGroup>> {
        let mut conn = get_connection(&self.pool)?;
        let result = spec_groups::table
            .find(id)
            .first::<SpecGroupDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(SpecGroup::from))
    }

    async fn create_spec_group(&self, group: NewSpecGroup) -> Result<SpecGroup> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SpecGroup> {
                let now = now_text();
                let db = SpecGroupDB {
                    id: group.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    title: group.title,
                    specs: serde_json::to_string(&group.specs).map_err(StorageError::from)?,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(spec_groups::table)
                    .values(&db)
                    .returning(SpecGroupDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(SpecGroup::from(result))
            })
            .await
    }

    async fn update_spec_group(&self, group: SpecGroup) -> Result<SpecGroup> {
        let id = group.id.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SpecGroup> {
                let db = SpecGroupDB {
                    id: group.id,
                    title: group.title,
                    specs: serde_json::to_string(&group.specs).map_err(StorageError::from)?,
                    created_at: datetime_to_text(&group.created_at),
                    updated_at: now_text(),
                };

                diesel::update(spec_groups::table.find(&id))
                    .set((
                        spec_groups::title.eq(&db.title),
                        spec_groups::specs.eq(&db.specs),
                        spec_groups::updated_at.eq(&db.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result = spec_groups::table
                    .find(&id)
                    .first::<SpecGroupDB>(conn)
                    .map_err(StorageError::from)?;

                Ok(SpecGroup::from(result))
            })
            .await
    }

    async fn delete_spec_group(&self, id: &str) -> Result<usize> {
        let id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(spec_groups::table.find(&id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn attach_spec_group(&self, link: CategorySpecGroup) -> Result<CategorySpecGroup> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CategorySpecGroup> {
                let db = CategorySpecGroupDB::from(link);

                let result = diesel::insert_into(category_spec_groups::table)
                    .values(&db)
                    .on_conflict((
                        category_spec_groups::category_id,
                        category_spec_groups::spec_group_id,
                    ))
                    .do_update()
                    .set(category_spec_groups::sort_order.eq(db.sort_order))
                    .returning(CategorySpecGroupDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(CategorySpecGroup::from(result))
            })
            .await
    }

    async fn detach_spec_group(&self, category_id: &str, spec_group_id: &str) -> Result<usize> {
        let category_id = category_id.to_string();
        let spec_group_id = spec_group_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    category_spec_groups::table
                        .filter(category_spec_groups::category_id.eq(&category_id))
                        .filter(category_spec_groups::spec_group_id.eq(&spec_group_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
