use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::{NewUser, User, UserRepositoryTrait, UserRole, UserServiceTrait};
use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::{Error, ValidationError};
use crate::utils::text_utils::normalize_email;
use crate::Result;

/// Checks sign-up input before the password is hashed. Returns the normalized email.
pub fn validate_sign_up(email: &str, password: &str) -> Result<String> {
    let email = normalize_email(email);
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::InvalidInput(format!("Invalid email address '{}'", email)).into());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ))
        .into());
    }
    Ok(email)
}

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.repository.get_user(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.get_user_by_email(&normalize_email(email))
    }

    async fn register_customer(&self, email: &str, password_hash: &str) -> Result<User> {
        let email = normalize_email(email);
        if self.repository.get_user_by_email(&email)?.is_some() {
            return Err(Error::ConstraintViolation(format!(
                "An account with email '{}' already exists",
                email
            )));
        }
        self.repository
            .create_user(NewUser {
                email,
                password_hash: password_hash.to_string(),
                role: UserRole::Customer,
            })
            .await
    }

    async fn ensure_admin(&self, email: &str, password_hash: &str) -> Result<User> {
        let email = normalize_email(email);
        if email.is_empty() || password_hash.trim().is_empty() {
            return Err(ValidationError::MissingField("admin credentials".to_string()).into());
        }
        match self.repository.get_user_by_email(&email)? {
            Some(existing) if existing.is_admin() && existing.password_hash == password_hash => {
                Ok(existing)
            }
            Some(existing) => {
                info!("Updating admin account {}", email);
                self.repository
                    .update_credentials(&existing.id, password_hash, UserRole::Admin)
                    .await
            }
            None => {
                info!("Creating admin account {}", email);
                self.repository
                    .create_user(NewUser {
                        email,
                        password_hash: password_hash.to_string(),
                        role: UserRole::Admin,
                    })
                    .await
            }
        }
    }
}
