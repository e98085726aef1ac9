/// Account operations: registration and credential checks.
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Role, User};
use crate::security::{hash_password, verify_password};
use crate::store::Stores;

#[derive(Clone)]
pub struct AuthService {
    stores: Arc<Stores>,
}

/// Outcome of a successful credential check.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub firstname: String,
    pub is_admin: bool,
}

impl AuthService {
    pub fn new(stores: Arc<Stores>) -> Self {
        Self { stores }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser> {
        let doc = self.stores.users.read().await?;
        let user = doc
            .users
            .iter()
            .find(|u| u.username == username)
            .ok_or(AppError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(AuthenticatedUser {
            username: user.username.clone(),
            firstname: user.firstname.clone(),
            is_admin: user.is_admin(),
        })
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        firstname: &str,
        phone: &str,
    ) -> Result<User> {
        if username.is_empty() || password.is_empty() || firstname.is_empty() || phone.is_empty() {
            return Err(AppError::Validation("All fields are required".to_string()));
        }

        let user = User {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            firstname: firstname.to_string(),
            phone: phone.to_string(),
            role: Role::User,
        };

        let registered = user.clone();
        self.stores
            .users
            .mutate(move |doc| {
                // Case-sensitive exact match, like the lookup on login.
                if doc.users.iter().any(|u| u.username == user.username) {
                    return Err(AppError::Conflict("Username already taken".to_string()));
                }
                doc.users.push(user);
                Ok(())
            })
            .await?;

        tracing::info!(username = %registered.username, "registered new user");
        Ok(registered)
    }

    /// Ensure the configured admin account exists. Called once at startup.
    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<()> {
        let exists = self
            .stores
            .users
            .read()
            .await?
            .users
            .iter()
            .any(|u| u.username == username);
        if exists {
            return Ok(());
        }

        let admin = User {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            firstname: "Admin".to_string(),
            phone: String::new(),
            role: Role::Admin,
        };
        self.stores
            .users
            .mutate(move |doc| {
                if doc.users.iter().any(|u| u.username == admin.username) {
                    return Ok(());
                }
                doc.users.push(admin);
                Ok(())
            })
            .await?;

        tracing::info!(%username, "seeded admin account");
        Ok(())
    }
}
