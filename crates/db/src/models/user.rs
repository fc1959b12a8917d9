//! User entity model and DTOs.

use appvet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// The password hash is deliberately excluded from serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. Role defaults to `user` if omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Option<String>,
}

/// Public projection of a user, safe to embed in API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
}
