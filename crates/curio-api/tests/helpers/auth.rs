use async_trait::async_trait;
use chrono::Utc;
use curio_api::auth::token::issue_token;
use curio_core::models::User;
use curio_core::{AppError, Config};
use curio_db::UserDirectory;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// A seeded account plus a token for it
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub struct InMemoryUsers {
    users: Vec<User>,
}

impl InMemoryUsers {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }
}

/// Account with `TEST_PASSWORD`, hashed at the lowest bcrypt cost
pub fn seeded_user(name: &str, email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: bcrypt::hash(TEST_PASSWORD, 4).expect("hash password"),
        created_at: Utc::now(),
    }
}

pub fn test_user(config: &Config, user: &User) -> TestUser {
    TestUser {
        id: user.id,
        email: user.email.clone(),
        token: issue_token(config, user.id, &user.email).expect("issue token"),
    }
}
