//! In-memory store for unit testing.
//!
//! This module provides a store that can be used in tests
//! without a running Postgres server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::StoreError;
use crate::models::{User, UserFields, UserProfile, UserProfileFields};

use super::{Store, StoreResult};

/// Configuration for in-memory store behavior.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    /// Whether every statement should fail.
    pub fail_statements: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// In-memory store keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    config: MemoryConfig,
    users: Arc<DashMap<i32, User>>,
    profiles: Arc<DashMap<i32, UserProfile>>,
    /// Statements attempted, including failed ones.
    statements: Arc<AtomicUsize>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with custom configuration.
    pub fn with_config(config: MemoryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Number of statements executed so far.
    pub fn statements(&self) -> usize {
        self.statements.load(Ordering::SeqCst)
    }

    /// Seed a user without counting a statement.
    pub fn seed_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Seed a profile without counting a statement.
    pub fn seed_user_profile(&self, profile: UserProfile) {
        self.profiles.insert(profile.id, profile);
    }

    async fn begin(&self, statement: &str) -> StoreResult<()> {
        self.statements.fetch_add(1, Ordering::SeqCst);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.fail_statements {
            return Err(StoreError::Rejected(format!(
                "simulated failure in {}",
                statement
            )));
        }
        Ok(())
    }
}

fn sorted_by_id<T: Clone>(map: &DashMap<i32, T>) -> Vec<T> {
    let mut rows: Vec<(i32, T)> = map
        .iter()
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect();
    rows.sort_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, row)| row).collect()
}

fn insert_unique<T: Clone>(map: &DashMap<i32, T>, id: i32, row: &T) -> StoreResult<()> {
    match map.entry(id) {
        Entry::Occupied(_) => Err(StoreError::Rejected(format!(
            "duplicate key value violates unique constraint: id={}",
            id
        ))),
        Entry::Vacant(slot) => {
            slot.insert(row.clone());
            Ok(())
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.begin("list_users").await?;
        Ok(sorted_by_id(&self.users))
    }

    async fn get_user(&self, id: i32) -> StoreResult<Option<User>> {
        self.begin("get_user").await?;
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        self.begin("insert_user").await?;
        insert_unique(&self.users, user.id, user)
    }

    async fn update_user(&self, id: i32, fields: &UserFields) -> StoreResult<u64> {
        self.begin("update_user").await?;
        match self.users.get_mut(&id) {
            Some(mut user) => {
                user.fields = fields.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_user(&self, id: i32) -> StoreResult<u64> {
        self.begin("delete_user").await?;
        Ok(self.users.remove(&id).map_or(0, |_| 1))
    }

    async fn list_user_profiles(&self) -> StoreResult<Vec<UserProfile>> {
        self.begin("list_user_profiles").await?;
        Ok(sorted_by_id(&self.profiles))
    }

    async fn get_user_profile(&self, id: i32) -> StoreResult<Option<UserProfile>> {
        self.begin("get_user_profile").await?;
        Ok(self.profiles.get(&id).map(|profile| profile.clone()))
    }

    async fn insert_user_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.begin("insert_user_profile").await?;
        insert_unique(&self.profiles, profile.id, profile)
    }

    async fn update_user_profile(
        &self,
        id: i32,
        fields: &UserProfileFields,
    ) -> StoreResult<u64> {
        self.begin("update_user_profile").await?;
        match self.profiles.get_mut(&id) {
            Some(mut profile) => {
                profile.fields = fields.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_user_profile(&self, id: i32) -> StoreResult<u64> {
        self.begin("delete_user_profile").await?;
        Ok(self.profiles.remove(&id).map_or(0, |_| 1))
    }
}
