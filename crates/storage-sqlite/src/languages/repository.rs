use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use storefront_core::languages::{Language, LanguageRepositoryTrait};
use storefront_core::Result;

use super::model::LanguageDB;
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::languages;

/// Languages are reference data seeded by migrations; there are no writes.
pub struct LanguageRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl LanguageRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl LanguageRepositoryTrait for LanguageRepository {
    fn get_languages(&self) -> Result<Vec<Language>> {
        let mut conn = get_connection(&self.pool)?;
        let results = languages::table
            .order((languages::is_default.desc(), languages::code.asc()))
            .load::<LanguageDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Language::from).collect())
    }
}
