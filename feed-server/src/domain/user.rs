use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Id given to a user that the identity store has not assigned yet.
pub(crate) const UNASSIGNED_USER_ID: i64 = 0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_register_username(&self.username)?;
        validate_new_password(&self.password)?;
        Ok(Self {
            username,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PasswordChangeRequest {
    pub(crate) old_password: String,
    pub(crate) new_password: String,
}

impl PasswordChangeRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if self.old_password.is_empty() {
            return Err(DomainError::Validation {
                field: "old_password",
                message: "must not be empty",
            });
        }
        validate_new_password(&self.new_password)?;
        Ok(self)
    }
}

/// Identity record. `password_hash` is an opaque PHC string.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) password_hash: String,
}

impl User {
    /// Builds a user that has not been saved yet.
    pub(crate) fn unsaved(
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let username = normalize_register_username(&username.into())?;
        Ok(Self {
            id: UNASSIGNED_USER_ID,
            username,
            password_hash: password_hash.into(),
        })
    }

    pub(crate) fn with_password_hash(self, password_hash: impl Into<String>) -> Self {
        Self {
            password_hash: password_hash.into(),
            ..self
        }
    }
}

fn normalize_register_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    if username.len() < 3 || username.len() > 64 {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    Ok(username.to_string())
}

fn validate_new_password(password: &str) -> Result<(), DomainError> {
    let password_len = password.chars().count();
    if !(8..=128).contains(&password_len) {
        return Err(DomainError::Validation {
            field: "password",
            message: "must be 8..128 chars",
        });
    }
    Ok(())
}
