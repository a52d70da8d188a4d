//! Database models for products and their translations.

use diesel::prelude::*;
use log::error;

use storefront_core::products::{Product, ProductTranslation};

use crate::utils::{text_to_datetime, text_to_decimal};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductDB {
    pub id: String,
    pub category_id: String,
    pub slug: String,
    /// Decimal text, base currency
    pub price: String,
    pub image_url: Option<String>,
    pub stock: i32,
    pub is_active: bool,
    /// JSON object of label -> value
    pub specifications: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::product_translations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductTranslationDB {
    pub product_id: String,
    pub language_code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<ProductDB> for Product {
    fn from(db: ProductDB) -> Self {
        let specifications = serde_json::from_str(&db.specifications).unwrap_or_else(|e| {
            error!("Failed to parse specifications of product '{}': {}", db.id, e);
            Default::default()
        });
        Self {
            price: text_to_decimal(&db.price),
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
            id: db.id,
            category_id: db.category_id,
            slug: db.slug,
            image_url: db.image_url,
            stock: db.stock,
            is_active: db.is_active,
            specifications,
        }
    }
}

impl From<ProductTranslationDB> for ProductTranslation {
    fn from(db: ProductTranslationDB) -> Self {
        Self {
            product_id: db.product_id,
            language_code: db.language_code,
            name: db.name,
            description: db.description,
        }
    }
}

impl From<ProductTranslation> for ProductTranslationDB {
    fn from(domain: ProductTranslation) -> Self {
        Self {
            product_id: domain.product_id,
            language_code: domain.language_code,
            name: domain.name,
            description: domain.description,
        }
    }
}
