use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use storefront_core::currencies::{Currency, CurrencyRepositoryTrait};
use storefront_core::errors::Error;
use storefront_core::Result;

use super::model::CurrencyDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::currencies;

pub struct CurrencyRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CurrencyRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CurrencyRepositoryTrait for CurrencyRepository {
    fn get_currencies(&self) -> Result<Vec<Currency>> {
        let mut conn = get_connection(&self.pool)?;
        let results = currencies::table
            .order((currencies::is_default.desc(), currencies::code.asc()))
            .load::<CurrencyDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results.into_iter().map(Currency::from).collect())
    }

    fn get_currency(&self, code: &str) -> Result<Option<Currency>> {
        let mut conn = get_connection(&self.pool)?;
        let result = currencies::table
            .find(code)
            .first::<CurrencyDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(Currency::from))
    }

    async fn update_exchange_rate(&self, code: &str, rate: Decimal) -> Result<Currency> {
        let code = code.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Currency> {
                let updated = diesel::update(currencies::table.find(&code))
                    .set(currencies::exchange_rate.eq(rate.to_string()))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::UnsupportedCurrency(code));
                }

                let result = currencies::table
                    .find(&code)
                    .first::<CurrencyDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Currency::from(result))
            })
            .await
    }
}
