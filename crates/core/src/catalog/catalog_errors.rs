use thiserror::Error;

/// Errors raised by catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    #[error("Specification group '{0}' not found")]
    SpecGroupNotFound(String),

    #[error("Category hierarchy contains a cycle at '{0}'")]
    CategoryCycle(String),

    #[error("Invalid parent for category '{category_id}': {reason}")]
    InvalidParent { category_id: String, reason: String },

    #[error("Category '{0}' is not empty: {1}")]
    CategoryNotEmpty(String, String),
}
