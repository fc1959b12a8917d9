//! Well-known role name constants.
//!
//! These must match the role values seeded in
//! `db/migrations/0001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
