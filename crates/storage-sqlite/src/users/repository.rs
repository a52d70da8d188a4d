use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use storefront_core::users::{NewUser, User, UserRepositoryTrait, UserRole};
use storefront_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::utils::now_text;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_user(&self, id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let result = users::table
            .find(id)
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(User::from))
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let result = users::table
            .filter(users::email.eq(email))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result.map(User::from))
    }

    fn count_users_by_role(&self, role: UserRole) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .filter(users::role.eq(role.as_str()))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = now_text();
                let db = UserDB {
                    id: Uuid::new_v4().to_string(),
                    email: user.email,
                    password_hash: user.password_hash,
                    role: user.role.as_str().to_string(),
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(users::table)
                    .values(&db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(User::from(result))
            })
            .await
    }

    async fn update_credentials(
        &self,
        id: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User> {
        let id = id.to_string();
        let password_hash = password_hash.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::update(users::table.find(&id))
                    .set((
                        users::password_hash.eq(&password_hash),
                        users::role.eq(role.as_str()),
                        users::updated_at.eq(now_text()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result = users::table
                    .find(&id)
                    .first::<UserDB>(conn)
                    .map_err(StorageError::from)?;

                Ok(User::from(result))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_db;
    use storefront_core::errors::{DatabaseError, Error};
    use storefront_core::users::{UserService, UserServiceTrait};

    fn new_user(email: &str, role: UserRole) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$stub".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_find_and_count() {
        let db = setup_db();
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());

        let created = repo
            .create_user(new_user("jane@example.com", UserRole::Customer))
            .await
            .unwrap();
        repo.create_user(new_user("root@example.com", UserRole::Admin))
            .await
            .unwrap();

        let found = repo.get_user_by_email("jane@example.com").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.role, UserRole::Customer);
        assert_eq!(repo.count_users_by_role(UserRole::Customer).unwrap(), 1);
        assert_eq!(repo.count_users_by_role(UserRole::Admin).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_is_unique() {
        let db = setup_db();
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());
        repo.create_user(new_user("jane@example.com", UserRole::Customer))
            .await
            .unwrap();

        let err = repo
            .create_user(new_user("jane@example.com", UserRole::Admin))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_ensure_admin_promotes_existing_customer() {
        let db = setup_db();
        let repo = Arc::new(UserRepository::new(db.pool.clone(), db.writer.clone()));
        let service = UserService::new(repo.clone());

        let customer = service
            .register_customer("Owner@Shop.test", "hash-a")
            .await
            .unwrap();
        let admin = service.ensure_admin("owner@shop.test", "hash-b").await.unwrap();

        assert_eq!(admin.id, customer.id);
        assert!(admin.is_admin());
        assert_eq!(repo.get_user(&admin.id).unwrap().unwrap().password_hash, "hash-b");
    }
}
