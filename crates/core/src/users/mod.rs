//! User accounts - customers and administrators.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{NewUser, User, UserRole};
pub use users_service::{validate_sign_up, UserService};
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
