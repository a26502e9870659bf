//! User profile rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row in `user_profiles`.
///
/// `user_id` and `connections` reference user ids, but nothing here checks
/// that those users exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    /// Unique profile id.
    pub id: i32,
    /// Every other column.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: UserProfileFields,
}

/// Mutable columns of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserProfileFields {
    /// Owning user.
    pub user_id: Option<i32>,
    pub profile_url: Option<String>,
    pub background_url: Option<String>,
    pub major: Option<String>,
    pub bio: Option<String>,
    pub date_of_birth: Option<String>,
    pub pronouns: Option<String>,
    pub created_at: Option<String>,
    /// Graduation year.
    pub class_of: Option<i32>,
    /// Connected user ids, in insertion order.
    pub connections: Option<Vec<i32>>,
}

impl UserProfile {
    /// Create a profile from its id and fields.
    pub fn new(id: i32, fields: UserProfileFields) -> Self {
        Self { id, fields }
    }
}
