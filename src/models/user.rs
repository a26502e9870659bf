//! User rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row in `users`. The id is chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user id.
    pub id: i32,
    /// Every other column.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: UserFields,
}

/// Mutable columns of a user. Absent JSON fields become SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub hometown: Option<String>,
}

impl User {
    /// Create a user from its id and fields.
    pub fn new(id: i32, fields: UserFields) -> Self {
        Self { id, fields }
    }
}
