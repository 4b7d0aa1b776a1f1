//! Registration and authentication against the user table
//!
//! Both checks are plain functions over a loaded table so they can be tested
//! without any storage. [`AccountService`](crate::core::service::AccountService)
//! wraps them with load/save and sessions.

use crate::core::error::AuthError;
use crate::core::user::User;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};

/// Account rules that differ between deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPolicy {
    /// Accept the email address as an alternate login identifier
    pub login_with_email: bool,

    /// Refuse a registration whose email is already used by another account
    pub unique_email: bool,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            login_with_email: true,
            unique_email: true,
        }
    }
}

/// Hash a secret with Argon2id and a fresh random salt
pub fn hash_secret(secret: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing {
            message: e.to_string(),
        })
}

/// Check a secret against a stored PHC hash string
pub fn verify_secret(secret: &str, stored: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored).map_err(|e| AuthError::Hashing {
        message: format!("stored credential is not a password hash: {}", e),
    })?;
    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}

/// Authenticate `identifier`/`secret` against `users`
///
/// The identifier is matched exactly against usernames, then against emails
/// when the policy allows it. Returns the matched username.
pub fn authenticate(
    users: &[User],
    identifier: &str,
    secret: &str,
    policy: &AccountPolicy,
) -> Result<String, AuthError> {
    let user = users
        .iter()
        .find(|u| u.username == identifier)
        .or_else(|| {
            if policy.login_with_email && !identifier.is_empty() {
                users.iter().find(|u| u.email == identifier)
            } else {
                None
            }
        })
        .ok_or_else(|| AuthError::IdentifierNotFound {
            identifier: identifier.to_string(),
        })?;

    if verify_secret(secret, &user.password_hash)? {
        Ok(user.username.clone())
    } else {
        Err(AuthError::SecretMismatch {
            username: user.username.clone(),
        })
    }
}

/// Append a new account to `users`
///
/// Fails with `AlreadyExists` when the username is taken, or when the email
/// is taken and the policy requires unique emails. Returns the new username.
pub fn register(
    users: &mut Vec<User>,
    identifier: &str,
    secret: &str,
    email: &str,
    policy: &AccountPolicy,
) -> Result<String, AuthError> {
    if identifier.trim().is_empty() {
        return Err(AuthError::InvalidInput {
            field: "username",
            message: "must not be empty".to_string(),
        });
    }
    if secret.is_empty() {
        return Err(AuthError::InvalidInput {
            field: "password",
            message: "must not be empty".to_string(),
        });
    }

    if users.iter().any(|u| u.username == identifier) {
        return Err(AuthError::AlreadyExists {
            field: "username",
            value: identifier.to_string(),
        });
    }
    if policy.unique_email && !email.is_empty() && users.iter().any(|u| u.email == email) {
        return Err(AuthError::AlreadyExists {
            field: "email",
            value: email.to_string(),
        });
    }

    users.push(User {
        username: identifier.to_string(),
        password_hash: hash_secret(secret)?,
        email: email.to_string(),
    });

    Ok(identifier.to_string())
}
