//! Database models for categories and specification groups.

use diesel::prelude::*;
use log::error;

use storefront_core::catalog::{Category, CategorySpecGroup, SpecGroup};

use crate::utils::{datetime_to_text, text_to_datetime};

#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CategoryDB {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategoryDB {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::spec_groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SpecGroupDB {
    pub id: String,
    pub title: String,
    /// JSON array of labels
    pub specs: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::category_spec_groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategorySpecGroupDB {
    pub category_id: String,
    pub spec_group_id: String,
    pub sort_order: i32,
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            id: db.id,
            parent_id: db.parent_id,
            name: db.name,
            slug: db.slug,
            description: db.description,
            sort_order: db.sort_order,
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
        }
    }
}

impl From<Category> for CategoryDB {
    fn from(domain: Category) -> Self {
        Self {
            id: domain.id,
            parent_id: domain.parent_id,
            name: domain.name,
            slug: domain.slug,
            description: domain.description,
            sort_order: domain.sort_order,
            created_at: datetime_to_text(&domain.created_at),
            updated_at: datetime_to_text(&domain.updated_at),
        }
    }
}

impl From<SpecGroupDB> for SpecGroup {
    fn from(db: SpecGroupDB) -> Self {
        let specs = serde_json::from_str(&db.specs).unwrap_or_else(|e| {
            error!("Failed to parse specs of group '{}': {}", db.id, e);
            Vec::new()
        });
        Self {
            id: db.id,
            title: db.title,
            specs,
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
        }
    }
}

impl From<CategorySpecGroupDB> for CategorySpecGroup {
    fn from(db: CategorySpecGroupDB) -> Self {
        Self {
            category_id: db.category_id,
            spec_group_id: db.spec_group_id,
            sort_order: db.sort_order,
        }
    }
}

impl From<CategorySpecGroup> for CategorySpecGroupDB {
    fn from(domain: CategorySpecGroup) -> Self {
        Self {
            category_id: domain.category_id,
            spec_group_id: domain.spec_group_id,
            sort_order: domain.sort_order,
        }
    }
}
