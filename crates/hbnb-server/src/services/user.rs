// User service: registration, profile updates and credential checks

use hbnb_core::{validation, Error, Result, User};
use std::sync::Arc;
use uuid::Uuid;

use super::unique_or_internal;
use crate::api::users::{CreateUserRequest, UpdateUserRequest};
use crate::storage::{
    models::{CreateUserRow, UpdateUser},
    password::{hash_password, verify_password},
    StorageBackend, UserRow,
};

const EMAIL_TAKEN: &str = "Email already registered";

pub struct UserService {
    db: Arc<StorageBackend>,
}

impl UserService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: CreateUserRequest) -> Result<User> {
        validation::validate_name("first_name", &req.first_name)?;
        validation::validate_name("last_name", &req.last_name)?;
        validation::validate_email(&req.email)?;
        validation::validate_password(&req.password)?;

        let email = validation::normalize_email(&req.email);
        if self.db.get_user_by_email(&email).await?.is_some() {
            return Err(Error::validation(EMAIL_TAKEN));
        }

        let input = CreateUserRow {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email,
            password_hash: hash_password(&req.password)?,
            is_admin: req.is_admin,
        };
        let row = self
            .db
            .create_user(input)
            .await
            .map_err(|e| unique_or_internal(e, "users_email_key", EMAIL_TAKEN))?;

        tracing::info!(user_id = %row.id, is_admin = row.is_admin, "User created");
        Ok(Self::row_to_user(row))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<User>> {
        let row = self.db.get_user(id).await?;
        Ok(row.map(Self::row_to_user))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = self.db.list_users().await?;
        Ok(rows.into_iter().map(Self::row_to_user).collect())
    }

    pub async fn update(&self, id: Uuid, req: UpdateUserRequest) -> Result<Option<User>> {
        if let Some(first_name) = &req.first_name {
            validation::validate_name("first_name", first_name)?;
        }
        if let Some(last_name) = &req.last_name {
            validation::validate_name("last_name", last_name)?;
        }
        if let Some(email) = &req.email {
            validation::validate_email(email)?;
        }
        if let Some(password) = &req.password {
            validation::validate_password(password)?;
        }

        let email = req.email.as_deref().map(validation::normalize_email);
        if let Some(email) = &email {
            if let Some(existing) = self.db.get_user_by_email(email).await? {
                if existing.id != id {
                    return Err(Error::validation(EMAIL_TAKEN));
                }
            }
        }

        let password_hash = match &req.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let input = UpdateUser {
            first_name: req.first_name.map(|s| s.trim().to_string()),
            last_name: req.last_name.map(|s| s.trim().to_string()),
            email,
            password_hash,
            is_admin: req.is_admin,
        };
        let row = self
            .db
            .update_user(id, input)
            .await
            .map_err(|e| unique_or_internal(e, "users_email_key", EMAIL_TAKEN))?;

        if let Some(row) = &row {
            tracing::info!(user_id = %row.id, "User updated");
        }
        Ok(row.map(Self::row_to_user))
    }

    /// Check credentials; `None` covers both an unknown email and a wrong password
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let email = validation::normalize_email(email);
        let Some(row) = self.db.get_user_by_email(&email).await? else {
            return Ok(None);
        };

        if !verify_password(password, &row.password_hash)? {
            tracing::debug!(user_id = %row.id, "Password mismatch");
            return Ok(None);
        }

        Ok(Some(Self::row_to_user(row)))
    }

    /// Create the configured admin, or promote an existing account with that email
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<User> {
        let normalized = validation::normalize_email(email);

        if let Some(existing) = self.db.get_user_by_email(&normalized).await? {
            if existing.is_admin {
                return Ok(Self::row_to_user(existing));
            }
            let input = UpdateUser {
                is_admin: Some(true),
                ..Default::default()
            };
            let row = self
                .db
                .update_user(existing.id, input)
                .await?
                .ok_or_else(|| Error::not_found("User not found"))?;
            tracing::info!(user_id = %row.id, "Promoted existing user to admin");
            return Ok(Self::row_to_user(row));
        }

        let user = self
            .create(CreateUserRequest {
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                email: email.to_string(),
                password: password.to_string(),
                is_admin: true,
            })
            .await?;
        tracing::info!(user_id = %user.id, "Admin user created");
        Ok(user)
    }

    fn row_to_user(row: UserRow) -> User {
        User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            is_admin: row.is_admin,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
