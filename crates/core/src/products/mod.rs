//! Products module - catalog items, their translations and listings.

mod products_model;
mod products_service;
mod products_traits;

pub use products_model::{
    NewProduct, Product, ProductDetail, ProductFilter, ProductPage, ProductQuery, ProductSort,
    ProductSummary, ProductTranslation, ProductUpdate, SpecSheetEntry, SpecSheetGroup,
};
pub use products_service::ProductService;
pub use products_traits::{ProductRepositoryTrait, ProductServiceTrait};
