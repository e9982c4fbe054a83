//! Registration, login and profile edits.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::forms::{ProfileForm, RegistrationForm};
use crate::ports::{PasswordService, UserRepository};

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    pub async fn register(&self, form: RegistrationForm) -> Result<User, DomainError> {
        let registration = form.clean()?;
        self.ensure_username_free(&registration.username, None).await?;

        let password_hash = self
            .passwords
            .hash(&registration.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = User::new(registration.username, registration.email, password_hash);
        let user = self.users.insert(user).await.map_err(duplicate_username)?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Unknown usernames and wrong passwords fail the same way.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if !valid {
            tracing::debug!(username = %username, "Rejected login");
            return Err(DomainError::Unauthorized);
        }
        Ok(user)
    }

    pub async fn find(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        form: ProfileForm,
    ) -> Result<User, DomainError> {
        let form = form.clean()?;
        let mut user = self.find(user_id).await?;
        self.ensure_username_free(&form.username, Some(user_id))
            .await?;

        user.first_name = form.first_name;
        user.last_name = form.last_name;
        user.email = form.email;
        user.username = form.username;
        user.updated_at = Utc::now();

        let user = self.users.update(user).await.map_err(duplicate_username)?;
        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(user)
    }

    async fn ensure_username_free(
        &self,
        username: &str,
        owner: Option<Uuid>,
    ) -> Result<(), DomainError> {
        match self.users.find_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => Err(DomainError::Duplicate(
                format!("username '{username}' is already taken"),
            )),
            _ => Ok(()),
        }
    }
}

/// A unique-constraint race on insert/update means the username was taken.
fn duplicate_username(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(_) => {
            DomainError::Duplicate("username is already taken".to_string())
        }
        other => other.into(),
    }
}
