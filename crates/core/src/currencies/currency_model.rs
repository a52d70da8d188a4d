use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::BASE_CURRENCY;

/// A currency prices can be displayed in.
///
/// `exchange_rate` is the value of one unit of this currency expressed in the
/// base currency, so a base price divided by it yields the local price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub exchange_rate: Decimal,
    #[serde(default)]
    pub is_default: bool,
}

impl Currency {
    pub fn is_base(&self) -> bool {
        self.code.eq_ignore_ascii_case(BASE_CURRENCY)
    }
}
