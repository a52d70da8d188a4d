use super::{Cart, CartSummary};
use crate::currencies::Currency;
use crate::Result;

pub trait CartServiceTrait: Send + Sync {
    /// Prices the cart from current catalog data. Client-side prices are never used.
    fn price_cart(
        &self,
        cart: &Cart,
        currency: Option<&Currency>,
        language: Option<&str>,
    ) -> Result<CartSummary>;
}
