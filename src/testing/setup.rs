use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::config::{Argon2Config, AuthConfig};
use crate::database;
use crate::entities::v1::sea_orm_active_enums::Role;
use crate::entities::v1::{accounts, users};
use crate::metrics::AppMetrics;
use crate::security::PasswordHasher;
use crate::state::AppState;

pub const ADMIN_TOKEN: &str = "TEST_ADMIN_TOKEN";
pub const PASSWORD: &str = "password";

/// In-memory SQLite database with all migrations applied
///
/// Panics on failure, tests should stop at a broken setup.
pub async fn database() -> DatabaseConnection {
    let db = database::memory()
        .await
        .expect("Failed to connect to in-memory database");

    database::migrate(&db)
        .await
        .expect("Failed to run migrations");

    db
}

/// Argon2id with cheap parameters (19 MiB, one pass, one lane)
pub fn password_hasher() -> PasswordHasher {
    PasswordHasher::from_config(&Argon2Config {
        memory_cost: 19456,
        time_cost: 1,
        parallelism: 1,
        hash_length: 32,
    })
    .expect("Test Argon2 parameters are valid")
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        admin_token: ADMIN_TOKEN.to_string(),
        ..AuthConfig::default()
    }
}

pub async fn state() -> AppState {
    AppState::new(
        database().await,
        auth_config(),
        password_hasher(),
        AppMetrics::new(),
    )
}

/// Inserts a user with its opening accounts, password is [`PASSWORD`]
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    role: Role,
) -> (users::Model, Vec<accounts::Model>) {
    let hash = password_hasher()
        .hash(PASSWORD)
        .expect("Failed to hash password");

    let txn = db.begin().await.expect("Failed to begin transaction");
    let created = users::Model::create(&txn, username.to_string(), hash, role)
        .await
        .expect("Failed to create user");
    txn.commit().await.expect("Failed to commit user");

    created
}

/// `Authorization` header value for Basic credentials
pub fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}
