//! Currencies module - exchange rates and price conversion.

mod conversion;
mod currency_model;
mod currency_service;
mod currency_traits;

pub use conversion::{convert_price, display_price};
pub use currency_model::Currency;
pub use currency_service::CurrencyService;
pub use currency_traits::{CurrencyRepositoryTrait, CurrencyServiceTrait};
