//! Catalog module - categories, specification groups and their inheritance.

mod catalog_errors;
mod catalog_model;
mod catalog_service;
mod catalog_traits;

pub use catalog_errors::CatalogError;
pub use catalog_model::{
    Category, CategoryNode, CategorySpecGroup, CategorySpecLevel, NewCategory, NewSpecGroup,
    SpecGroup,
};
pub use catalog_service::CategoryService;
pub use catalog_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
