//! Shopping cart - a reducer over cart actions plus server-side pricing.

mod cart_model;
mod cart_service;
mod cart_traits;

pub use cart_model::{Cart, CartAction, CartItem, CartLine, CartSummary};
pub use cart_service::CartService;
pub use cart_traits::CartServiceTrait;
