mod repository;

pub use repository::DashboardRepository;
