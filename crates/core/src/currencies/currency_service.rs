use async_trait::async_trait;
use log::warn;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{Currency, CurrencyRepositoryTrait, CurrencyServiceTrait};
use crate::constants::BASE_CURRENCY;
use crate::errors::{Error, ValidationError};
use crate::Result;

pub struct CurrencyService {
    repository: Arc<dyn CurrencyRepositoryTrait>,
}

impl CurrencyService {
    pub fn new(repository: Arc<dyn CurrencyRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }

    fn base_currency() -> Currency {
        Currency {
            code: BASE_CURRENCY.to_string(),
            name: "US Dollar".to_string(),
            symbol: "$".to_string(),
            exchange_rate: Decimal::ONE,
            is_default: true,
        }
    }
}

#[async_trait]
impl CurrencyServiceTrait for CurrencyService {
    fn get_currencies(&self) -> Result<Vec<Currency>> {
        self.repository.get_currencies()
    }

    fn get_currency(&self, code: &str) -> Result<Option<Currency>> {
        self.repository.get_currency(&Self::normalize_code(code))
    }

    fn get_default_currency(&self) -> Result<Currency> {
        let currencies = self.repository.get_currencies()?;
        if let Some(default) = currencies.iter().find(|c| c.is_default) {
            return Ok(default.clone());
        }
        if let Some(base) = currencies.into_iter().find(|c| c.is_base()) {
            return Ok(base);
        }
        warn!("No default currency configured, falling back to {}", BASE_CURRENCY);
        Ok(Self::base_currency())
    }

    fn resolve_currency(&self, code: Option<&str>) -> Result<Currency> {
        if let Some(code) = code.filter(|c| !c.trim().is_empty()) {
            if let Some(currency) = self.get_currency(code)? {
                return Ok(currency);
            }
        }
        self.get_default_currency()
    }

    async fn update_exchange_rate(&self, code: &str, rate: Decimal) -> Result<Currency> {
        let code = Self::normalize_code(code);
        if code == BASE_CURRENCY {
            return Err(ValidationError::InvalidInput(format!(
                "The exchange rate of the base currency {} is fixed",
                BASE_CURRENCY
            ))
            .into());
        }
        if rate <= Decimal::ZERO {
            return Err(Error::InvalidExchangeRate(format!(
                "Rate for {} must be positive, got {}",
                code, rate
            )));
        }
        if self.repository.get_currency(&code)?.is_none() {
            return Err(Error::UnsupportedCurrency(code));
        }
        self.repository.update_exchange_rate(&code, rate).await
    }
}
