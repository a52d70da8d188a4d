mod model;
mod repository;

pub use model::LanguageDB;
pub use repository::LanguageRepository;
