use async_trait::async_trait;
use rust_decimal::Decimal;

use super::Currency;
use crate::Result;

/// Repository trait for currency persistence.
#[async_trait]
pub trait CurrencyRepositoryTrait: Send + Sync {
    fn get_currencies(&self) -> Result<Vec<Currency>>;
    fn get_currency(&self, code: &str) -> Result<Option<Currency>>;
    async fn update_exchange_rate(&self, code: &str, rate: Decimal) -> Result<Currency>;
}

/// Service trait for currency lookups and rate maintenance.
#[async_trait]
pub trait CurrencyServiceTrait: Send + Sync {
    fn get_currencies(&self) -> Result<Vec<Currency>>;
    fn get_currency(&self, code: &str) -> Result<Option<Currency>>;
    fn get_default_currency(&self) -> Result<Currency>;
    /// The currency for `code` when it is known, otherwise the default one.
    fn resolve_currency(&self, code: Option<&str>) -> Result<Currency>;
    async fn update_exchange_rate(&self, code: &str, rate: Decimal) -> Result<Currency>;
}
