//! Postgres store over a process-wide `sqlx` pool.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::GatewayError;
use crate::metrics::StatementTimer;
use crate::models::{User, UserFields, UserProfile, UserProfileFields};

use super::{Store, StoreResult};

const LIST_USERS: &str = "SELECT * FROM users ORDER BY id ASC";
const GET_USER: &str = "SELECT * FROM users WHERE id = $1";
const INSERT_USER: &str = "INSERT INTO users (id, first_name, last_name, email, phone_number, hometown) \
     VALUES ($1, $2, $3, $4, $5, $6)";
const UPDATE_USER: &str = "UPDATE users SET first_name = $1, last_name = $2, email = $3, \
     phone_number = $4, hometown = $5 WHERE id = $6";
const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

const LIST_USER_PROFILES: &str = "SELECT * FROM user_profiles ORDER BY id ASC";
const GET_USER_PROFILE: &str = "SELECT * FROM user_profiles WHERE id = $1";
const INSERT_USER_PROFILE: &str = "INSERT INTO user_profiles (id, user_id, profile_url, background_url, major, bio, \
     date_of_birth, pronouns, created_at, class_of, connections) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)";
const UPDATE_USER_PROFILE: &str = "UPDATE user_profiles SET user_id = $1, profile_url = $2, background_url = $3, \
     major = $4, bio = $5, date_of_birth = $6, pronouns = $7, created_at = $8, \
     class_of = $9, connections = $10 WHERE id = $11";
const DELETE_USER_PROFILE: &str = "DELETE FROM user_profiles WHERE id = $1";

/// Store backed by a shared Postgres connection pool.
///
/// The pool acquires a connection per statement and releases it when the
/// statement completes or fails.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the pool from config. Connections are opened lazily.
    pub fn connect_lazy(config: &Config) -> Result<Self, GatewayError> {
        let ssl_mode = config.ssl_mode().map_err(GatewayError::InvalidConfig)?;
        let options: PgConnectOptions = config.database_url.parse()?;
        let options = options.ssl_mode(ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect_lazy_with(options);

        info!(
            "Database pool configured for {} (max {} connections)",
            config.redacted_database_url(),
            config.database_max_connections
        );
        Ok(Self::new(pool))
    }

    /// Round-trip a trivial statement to prove connectivity.
    pub async fn ping(&self) -> StoreResult<()> {
        let _timer = StatementTimer::new("ping");
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }
}

#[async_trait]
impl Store for PgStore {
    #[instrument(skip(self))]
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let _timer = StatementTimer::new("list_users");
        let users = sqlx::query_as::<_, User>(LIST_USERS)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: i32) -> StoreResult<Option<User>> {
        let _timer = StatementTimer::new("get_user");
        let user = sqlx::query_as::<_, User>(GET_USER)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(id = user.id))]
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let _timer = StatementTimer::new("insert_user");
        let fields = &user.fields;
        sqlx::query(INSERT_USER)
            .bind(user.id)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.phone_number)
            .bind(&fields.hometown)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, fields))]
    async fn update_user(&self, id: i32, fields: &UserFields) -> StoreResult<u64> {
        let _timer = StatementTimer::new("update_user");
        let result = sqlx::query(UPDATE_USER)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.phone_number)
            .bind(&fields.hometown)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: i32) -> StoreResult<u64> {
        let _timer = StatementTimer::new("delete_user");
        let result = sqlx::query(DELETE_USER)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_user_profiles(&self) -> StoreResult<Vec<UserProfile>> {
        let _timer = StatementTimer::new("list_user_profiles");
        let profiles = sqlx::query_as::<_, UserProfile>(LIST_USER_PROFILES)
            .fetch_all(&self.pool)
            .await?;
        Ok(profiles)
    }

    #[instrument(skip(self))]
    async fn get_user_profile(&self, id: i32) -> StoreResult<Option<UserProfile>> {
        let _timer = StatementTimer::new("get_user_profile");
        let profile = sqlx::query_as::<_, UserProfile>(GET_USER_PROFILE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    #[instrument(skip(self, profile), fields(id = profile.id))]
    async fn insert_user_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        let _timer = StatementTimer::new("insert_user_profile");
        let fields = &profile.fields;
        sqlx::query(INSERT_USER_PROFILE)
            .bind(profile.id)
            .bind(fields.user_id)
            .bind(&fields.profile_url)
            .bind(&fields.background_url)
            .bind(&fields.major)
            .bind(&fields.bio)
            .bind(&fields.date_of_birth)
            .bind(&fields.pronouns)
            .bind(&fields.created_at)
            .bind(fields.class_of)
            .bind(&fields.connections)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, fields))]
    async fn update_user_profile(
        &self,
        id: i32,
        fields: &UserProfileFields,
    ) -> StoreResult<u64> {
        let _timer = StatementTimer::new("update_user_profile");
        let result = sqlx::query(UPDATE_USER_PROFILE)
            .bind(fields.user_id)
            .bind(&fields.profile_url)
            .bind(&fields.background_url)
            .bind(&fields.major)
            .bind(&fields.bio)
            .bind(&fields.date_of_birth)
            .bind(&fields.pronouns)
            .bind(&fields.created_at)
            .bind(fields.class_of)
            .bind(&fields.connections)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_user_profile(&self, id: i32) -> StoreResult<u64> {
        let _timer = StatementTimer::new("delete_user_profile");
        let result = sqlx::query(DELETE_USER_PROFILE)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
