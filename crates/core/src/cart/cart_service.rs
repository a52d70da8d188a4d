use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::{Cart, CartLine, CartServiceTrait, CartSummary};
use crate::constants::BASE_CURRENCY;
use crate::currencies::{display_price, Currency};
use crate::products::{ProductServiceTrait, ProductSummary};
use crate::Result;

pub struct CartService {
    product_service: Arc<dyn ProductServiceTrait>,
}

impl CartService {
    pub fn new(product_service: Arc<dyn ProductServiceTrait>) -> Self {
        Self { product_service }
    }
}

impl CartServiceTrait for CartService {
    fn price_cart(
        &self,
        cart: &Cart,
        currency: Option<&Currency>,
        language: Option<&str>,
    ) -> Result<CartSummary> {
        let mut cart = cart.clone();
        cart.normalize();
        let ids: Vec<String> = cart.items.iter().map(|i| i.product_id.clone()).collect();
        let mut products: HashMap<String, ProductSummary> = self
            .product_service
            .get_summaries(&ids, language, currency)?
            .into_iter()
            .filter(|p| p.is_active)
            .map(|p| (p.id.clone(), p))
            .collect();

        let mut lines = Vec::with_capacity(cart.items.len());
        let mut unavailable = Vec::new();
        for item in &cart.items {
            let Some(product) = products.remove(&item.product_id) else {
                unavailable.push(item.product_id.clone());
                continue;
            };
            let quantity = Decimal::from(item.quantity);
            let line_total = product.price * quantity;
            lines.push(CartLine {
                in_stock: i64::from(product.stock) >= i64::from(item.quantity),
                product_id: product.id,
                name: product.name,
                slug: product.slug,
                image_url: product.image_url,
                quantity: item.quantity,
                unit_price: product.price,
                line_total,
                display_unit_price: product.display_price,
                display_line_total: display_price(line_total, currency)?,
            });
        }

        if !unavailable.is_empty() {
            debug!("Cart references unavailable products: {:?}", unavailable);
        }

        let (currency_code, currency_symbol) = match currency {
            Some(c) => (c.code.clone(), c.symbol.clone()),
            None => (BASE_CURRENCY.to_string(), "$".to_string()),
        };

        Ok(CartSummary {
            item_count: lines
                .iter()
                .fold(0u32, |count, l| count.saturating_add(l.quantity)),
            subtotal: lines.iter().map(|l| l.line_total).sum(),
            display_subtotal: lines.iter().map(|l| l.display_line_total).sum(),
            lines,
            currency: currency_code,
            currency_symbol,
            unavailable,
        })
    }
}
