mod model;
mod repository;

pub use model::{ProductDB, ProductTranslationDB};
pub use repository::ProductRepository;
