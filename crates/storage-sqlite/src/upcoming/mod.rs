mod model;
mod repository;

pub use model::UpcomingProductDB;
pub use repository::UpcomingProductRepository;
