mod model;
mod repository;

pub use model::{CategoryDB, CategorySpecGroupDB, NewCategoryDB, SpecGroupDB};
pub use repository::CategoryRepository;
