use async_trait::async_trait;
use curio_core::{models::User, AppError};
use sqlx::{PgPool, Postgres};

/// Lookup of accounts that may sign in and own videos
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by email. Callers normalize the address first.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    #[tracing::instrument(skip(self, email), fields(db.table = "users", db.operation = "select"))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
