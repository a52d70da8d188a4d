use diesel::prelude::*;

use storefront_core::upcoming::UpcomingProduct;

use crate::utils::{date_to_text, datetime_to_text, text_to_date, text_to_datetime};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::upcoming_products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UpcomingProductDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
    /// YYYY-MM-DD
    pub release_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UpcomingProductDB> for UpcomingProduct {
    fn from(db: UpcomingProductDB) -> Self {
        Self {
            release_date: text_to_date(&db.release_date),
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
            id: db.id,
            name: db.name,
            description: db.description,
            image_url: db.image_url,
            category_id: db.category_id,
        }
    }
}

impl From<UpcomingProduct> for UpcomingProductDB {
    fn from(domain: UpcomingProduct) -> Self {
        Self {
            release_date: date_to_text(&domain.release_date),
            created_at: datetime_to_text(&domain.created_at),
            updated_at: datetime_to_text(&domain.updated_at),
            id: domain.id,
            name: domain.name,
            description: domain.description,
            image_url: domain.image_url,
            category_id: domain.category_id,
        }
    }
}
