use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_LINE_QUANTITY;
use crate::errors::Error;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

/// Client-held cart state. Only product ids and quantities travel with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CartAction {
    Add { product_id: String, quantity: u32 },
    Remove { product_id: String },
    SetQuantity { product_id: String, quantity: u32 },
    Clear,
}

impl Cart {
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, i| count.saturating_add(i.quantity))
    }

    /// Merges duplicate lines, drops empty ones and caps every line at
    /// `MAX_LINE_QUANTITY`.
    pub fn normalize(&mut self) {
        let mut merged: Vec<CartItem> = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            let product_id = item.product_id.trim();
            if product_id.is_empty() || item.quantity == 0 {
                continue;
            }
            match merged.iter_mut().find(|m| m.product_id == product_id) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => merged.push(CartItem {
                    product_id: product_id.to_string(),
                    quantity: item.quantity,
                }),
            }
        }
        for line in &mut merged {
            line.quantity = line.quantity.min(MAX_LINE_QUANTITY);
        }
        self.items = merged;
    }

    /// Applies one action in place. The cart is normalized first, so line
    /// quantities never exceed `MAX_LINE_QUANTITY`.
    pub fn apply(&mut self, action: CartAction) -> Result<()> {
        self.normalize();
        match action {
            CartAction::Add {
                product_id,
                quantity,
            } => {
                let product_id = Self::require_product_id(product_id)?;
                if quantity == 0 {
                    return Err(Error::Cart("Quantity to add must be at least 1".to_string()));
                }
                match self.items.iter_mut().find(|i| i.product_id == product_id) {
                    Some(item) => {
                        item.quantity = item.quantity.saturating_add(quantity).min(MAX_LINE_QUANTITY)
                    }
                    None => self.items.push(CartItem {
                        product_id,
                        quantity: quantity.min(MAX_LINE_QUANTITY),
                    }),
                }
            }
            CartAction::Remove { product_id } => {
                self.items.retain(|i| i.product_id != product_id);
            }
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                let product_id = Self::require_product_id(product_id)?;
                if quantity == 0 {
                    self.items.retain(|i| i.product_id != product_id);
                    return Ok(());
                }
                let quantity = quantity.min(MAX_LINE_QUANTITY);
                match self.items.iter_mut().find(|i| i.product_id == product_id) {
                    Some(item) => item.quantity = quantity,
                    None => self.items.push(CartItem {
                        product_id,
                        quantity,
                    }),
                }
            }
            CartAction::Clear => self.items.clear(),
        }
        Ok(())
    }

    fn require_product_id(product_id: String) -> Result<String> {
        let trimmed = product_id.trim();
        if trimmed.is_empty() {
            return Err(Error::Cart("Product id is required".to_string()));
        }
        Ok(trimmed.to_string())
    }
}

/// A priced cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub display_unit_price: Decimal,
    pub display_line_total: Decimal,
    /// False when the requested quantity exceeds current stock
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    /// Base-currency subtotal
    pub subtotal: Decimal,
    pub display_subtotal: Decimal,
    pub currency: String,
    pub currency_symbol: String,
    /// Product ids that are unknown or no longer sold
    pub unavailable: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(id: &str, quantity: u32) -> CartAction {
        CartAction::Add {
            product_id: id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_add_merges_existing_line() {
        let mut cart = Cart::default();
        cart.apply(add("p1", 2)).unwrap();
        cart.apply(add("p2", 1)).unwrap();
        cart.apply(add("p1", 3)).unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.quantity_of("p1"), 5);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_add_zero_is_rejected() {
        let mut cart = Cart::default();
        assert!(matches!(cart.apply(add("p1", 0)), Err(Error::Cart(_))));
        assert!(cart.items.is_empty());
        assert!(cart.apply(add("  ", 1)).is_err());
    }

    #[test]
    fn test_quantity_is_capped() {
        let mut cart = Cart::default();
        cart.apply(add("p1", 60)).unwrap();
        cart.apply(add("p1", 60)).unwrap();
        assert_eq!(cart.quantity_of("p1"), MAX_LINE_QUANTITY);

        cart.apply(CartAction::SetQuantity {
            product_id: "p2".to_string(),
            quantity: 500,
        })
        .unwrap();
        assert_eq!(cart.quantity_of("p2"), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::default();
        cart.apply(add("p1", 2)).unwrap();
        cart.apply(CartAction::SetQuantity {
            product_id: "p1".to_string(),
            quantity: 0,
        })
        .unwrap();
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        cart.apply(add("p1", 1)).unwrap();
        cart.apply(add("p2", 1)).unwrap();
        cart.apply(CartAction::Remove {
            product_id: "p1".to_string(),
        })
        .unwrap();
        assert_eq!(cart.items.len(), 1);

        cart.apply(CartAction::Clear).unwrap();
        assert_eq!(cart, Cart::default());
    }

    fn client_cart(lines: &[(&str, u32)]) -> Cart {
        Cart {
            items: lines
                .iter()
                .map(|(id, quantity)| CartItem {
                    product_id: id.to_string(),
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn test_normalize_merges_duplicates_and_caps() {
        let mut cart = client_cart(&[("p1", 1), ("p2", 0), (" p1 ", 2), ("", 4), ("p3", u32::MAX)]);
        cart.normalize();
        assert_eq!(cart, client_cart(&[("p1", 3), ("p3", MAX_LINE_QUANTITY)]));
        assert_eq!(cart.item_count(), 3 + MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_apply_repairs_client_cart() {
        let mut cart = client_cart(&[("p1", 60), ("p1", 60), ("p2", 500)]);
        cart.apply(add("p1", 1)).unwrap();
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.quantity_of("p1"), MAX_LINE_QUANTITY);
        assert_eq!(cart.quantity_of("p2"), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_action_wire_format() {
        let action: CartAction =
            serde_json::from_str(r#"{"type":"setQuantity","productId":"p9","quantity":4}"#)
                .unwrap();
        assert_eq!(
            action,
            CartAction::SetQuantity {
                product_id: "p9".to_string(),
                quantity: 4,
            }
        );
        let clear: CartAction = serde_json::from_str(r#"{"type":"clear"}"#).unwrap();
        assert_eq!(clear, CartAction::Clear);
    }
}
