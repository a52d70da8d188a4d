use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};

use super::Currency;

/// Converts a base-currency price into `currency`.
///
/// No currency, or the base currency itself, leaves the price unchanged.
/// Otherwise the price is divided by the currency's exchange rate.
pub fn convert_price(price: Decimal, currency: Option<&Currency>) -> Result<Decimal> {
    let Some(currency) = currency else {
        return Ok(price);
    };
    if currency.is_base() {
        return Ok(price);
    }
    if currency.exchange_rate <= Decimal::ZERO {
        return Err(Error::InvalidExchangeRate(format!(
            "{} has a non-positive rate {}",
            currency.code, currency.exchange_rate
        )));
    }
    Ok(price / currency.exchange_rate)
}

/// Converted price rounded for display (2 dp, midpoint away from zero).
pub fn display_price(price: Decimal, currency: Option<&Currency>) -> Result<Decimal> {
    Ok(convert_price(price, currency)?.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    ))
}
