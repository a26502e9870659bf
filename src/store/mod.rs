//! Store module: the one seam between the router and the database.
//!
//! This module handles:
//! - The [`Store`] trait, one method per SQL statement
//! - A Postgres implementation over a shared `sqlx` pool
//! - An in-memory store for testing

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{User, UserFields, UserProfile, UserProfileFields};

pub use memory::{MemoryConfig, MemoryStore};
pub use postgres::PgStore;

/// Result of a single store statement.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Executes exactly one statement per call against the backing store.
///
/// Update and delete return the number of rows affected.
#[async_trait]
pub trait Store: Send + Sync {
    /// All users ordered by ascending id.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// The user with `id`, if any.
    async fn get_user(&self, id: i32) -> StoreResult<Option<User>>;

    /// Insert a user with its caller-chosen id.
    async fn insert_user(&self, user: &User) -> StoreResult<()>;

    /// Replace every mutable column of the user at `id`.
    async fn update_user(&self, id: i32, fields: &UserFields) -> StoreResult<u64>;

    /// Delete the user at `id`.
    async fn delete_user(&self, id: i32) -> StoreResult<u64>;

    /// All profiles ordered by ascending id.
    async fn list_user_profiles(&self) -> StoreResult<Vec<UserProfile>>;

    /// The profile with `id`, if any.
    async fn get_user_profile(&self, id: i32) -> StoreResult<Option<UserProfile>>;

    /// Insert a profile with its caller-chosen id.
    async fn insert_user_profile(&self, profile: &UserProfile) -> StoreResult<()>;

    /// Replace every mutable column of the profile at `id`.
    async fn update_user_profile(&self, id: i32, fields: &UserProfileFields)
        -> StoreResult<u64>;

    /// Delete the profile at `id`.
    async fn delete_user_profile(&self, id: i32) -> StoreResult<u64>;
}
