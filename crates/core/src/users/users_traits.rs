use async_trait::async_trait;

use super::{NewUser, User, UserRole};
use crate::Result;

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user(&self, id: &str) -> Result<Option<User>>;
    /// Lookup by normalized (lowercase) email.
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn count_users_by_role(&self, role: UserRole) -> Result<i64>;
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn update_credentials(
        &self,
        id: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User>;
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, id: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Creates a customer account. The password must already be hashed.
    async fn register_customer(&self, email: &str, password_hash: &str) -> Result<User>;
    /// Creates the admin account or brings an existing account's role and hash up to date.
    async fn ensure_admin(&self, email: &str, password_hash: &str) -> Result<User>;
}
