use diesel::prelude::*;
use log::error;

use storefront_core::users::{User, UserRole};

use crate::utils::text_to_datetime;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        // The column has a CHECK constraint, so this only trips on hand-edited rows
        let role = db.role.parse().unwrap_or_else(|e| {
            error!("User '{}' has an invalid role: {}", db.id, e);
            UserRole::Customer
        });
        Self {
            created_at: text_to_datetime(&db.created_at),
            updated_at: text_to_datetime(&db.updated_at),
            id: db.id,
            email: db.email,
            password_hash: db.password_hash,
            role,
        }
    }
}
