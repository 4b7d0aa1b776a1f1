//! User account records

use crate::core::store::{Row, TableRecord};
use serde::Serialize;

/// A registered user
///
/// `password_hash` holds an argon2 PHC string; the plaintext secret is never
/// stored.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub email: String,
}

/// Public view of a user, safe to return to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl TableRecord for User {
    const TABLE: &'static str = "users";

    fn headers() -> &'static [&'static str] {
        &["username", "password", "email"]
    }

    fn required_columns() -> &'static [&'static [&'static str]] {
        &[&["username"], &["password"]]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.password_hash.clone(),
            self.email.clone(),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        let username = row.require(&["username"])?;
        if username.is_empty() {
            return Err("username is empty".to_string());
        }
        Ok(User {
            username: username.to_string(),
            password_hash: row.require(&["password"])?.to_string(),
            email: row.get(&["email"]).unwrap_or_default().to_string(),
        })
    }

    fn key(&self) -> String {
        self.username.clone()
    }
}
