use diesel::prelude::*;

use storefront_core::languages::Language;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::languages)]
#[diesel(primary_key(code))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LanguageDB {
    pub code: String,
    pub name: String,
    pub is_default: bool,
}

impl From<LanguageDB> for Language {
    fn from(db: LanguageDB) -> Self {
        Self {
            code: db.code,
            name: db.name,
            is_default: db.is_default,
        }
    }
}
