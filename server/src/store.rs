//! Persistence behind the handlers.
//!
//! [`UserStore`] is the single seam between the HTTP layer and
//! storage. [`PgUserStore`] is the production implementation over a
//! sqlx pool; [`MemoryUserStore`] backs the endpoint tests.
//! Single-record reads and writes are atomic by
//! the store's own guarantee; nothing here adds transactions on top.

use std::collections::HashMap;

use anyhow::{bail, Context as _, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::database;
use crate::user::User;

/// Result of the init operation.
#[derive(Debug, Clone)]
pub struct InitReport {
    /// Whether the seed record was created (false if it already existed).
    pub created: bool,
    /// Names of the tables in the database.
    pub tables: Vec<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert(&self, user: &User) -> Result<()>;
    async fn update(&self, user: &User) -> Result<()>;
    /// Connection state string surfaced by `/health`.
    async fn status(&self) -> &'static str;
    /// Ensure storage exists and persist `seed` if absent.
    async fn init(&self, seed: User) -> Result<InitReport>;
}

/// Postgres-backed store. `location` lives in a JSONB column.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to look up user by email")
    }

    async fn insert(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, email, name, password_hash, location, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(sqlx::types::Json(&user.location))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert user")?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<()> {
        sqlx::query(
            "UPDATE users
             SET name = $2, password_hash = $3, location = $4, updated_at = $5
             WHERE email = $1",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(sqlx::types::Json(&user.location))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to update user")?;
        Ok(())
    }

    async fn status(&self) -> &'static str {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => "connected",
            Err(_) => "disconnected",
        }
    }

    async fn init(&self, seed: User) -> Result<InitReport> {
        database::ensure_schema(&self.pool).await?;

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT table_name::text FROM information_schema.tables
             WHERE table_schema = 'public' ORDER BY table_name",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list tables")?;

        let created = if self.find_by_email(&seed.email).await?.is_none() {
            self.insert(&seed).await?;
            true
        } else {
            false
        };

        Ok(InitReport { created, tables })
    }
}

/// In-memory store keyed by email.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            bail!("duplicate email: {}", user.email);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.email) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => bail!("no such user: {}", user.email),
        }
    }

    async fn status(&self) -> &'static str {
        "connected"
    }

    async fn init(&self, seed: User) -> Result<InitReport> {
        let created = if self.find_by_email(&seed.email).await?.is_none() {
            self.insert(&seed).await?;
            true
        } else {
            false
        };
        Ok(InitReport {
            created,
            tables: vec!["users".to_string()],
        })
    }
}
