//! User registration, login, and profile management.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use uuid::Uuid;

use dropvault_auth::{JwtEncoder, PasswordHasher, TokenPair};
use dropvault_core::config::auth::AuthConfig;
use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_database::repositories::UserRepository;
use dropvault_entity::user::{CreateUser, UpdateUser, User};

/// User account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    jwt: Arc<JwtEncoder>,
    password_min_length: usize,
}

impl UserService {
    /// Creates the service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        jwt: Arc<JwtEncoder>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            jwt,
            password_min_length: config.password_min_length,
        }
    }

    /// Registers a new user and issues their first token pair.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<(User, TokenPair)> {
        if name.is_empty() || email.is_empty() {
            return Err(AppError::validation("Name and email are required"));
        }
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let email = email.to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("A user with that email already exists"));
        }

        let id = format!("u_{}", short_uuid());
        let password_hash = self.hasher.hash_password(password)?;

        self.users
            .create(
                &id,
                &CreateUser {
                    name: name.to_string(),
                    email: email.clone(),
                    password_hash: password_hash.clone(),
                },
            )
            .await?;

        let user = User {
            id,
            name: name.to_string(),
            email,
            password_hash,
        };
        let tokens = self.jwt.generate_token_pair(&user)?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok((user, tokens))
    }

    /// Authenticates by email and password, issuing a fresh token pair.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let user = self
            .users
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(|| AppError::unauthorized("No user found with that email"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Incorrect password"));
        }

        let tokens = self.jwt.generate_token_pair(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user, tokens))
    }

    /// Fetches a user by id.
    pub async fn get(&self, id: &str) -> AppResult<User> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Lists all users.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    /// Updates name and/or email on a user's own profile.
    pub async fn update(&self, id: &str, mut update: UpdateUser) -> AppResult<()> {
        if let Some(email) = update.email.take() {
            update.email = Some(email.to_lowercase());
        }
        self.users.update(id, &update).await
    }

    /// Changes a user's password after verifying the current one.
    pub async fn change_password(
        &self,
        id: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(AppError::validation("Missing current or new password"));
        }
        if new_password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let user = self.get(id).await?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        let new_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(id, &new_hash).await?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    /// Deletes a user by id.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.users.delete(id).await
    }
}

/// Compact URL-safe rendering of a fresh UUID, alphanumeric only.
fn short_uuid() -> String {
    URL_SAFE_NO_PAD
        .encode(Uuid::new_v4().as_bytes())
        .replace(['-', '_'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_uuid_is_compact_and_alphanumeric() {
        let id = short_uuid();
        assert!(id.len() >= 16);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn short_uuids_are_unique() {
        assert_ne!(short_uuid(), short_uuid());
    }
}
