use diesel::prelude::*;

use storefront_core::currencies::Currency;

use crate::utils::text_to_decimal;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::currencies)]
#[diesel(primary_key(code))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CurrencyDB {
    pub code: String,
    pub name: String,
    pub symbol: String,
    /// Decimal text: USD value of one unit
    pub exchange_rate: String,
    pub is_default: bool,
}

impl From<CurrencyDB> for Currency {
    fn from(db: CurrencyDB) -> Self {
        Self {
            exchange_rate: text_to_decimal(&db.exchange_rate),
            code: db.code,
            name: db.name,
            symbol: db.symbol,
            is_default: db.is_default,
        }
    }
}
