//! User Repository
//!
//! Back-office accounts. Passwords are hashed with argon2 before they
//! ever reach the table.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, password_hash::rand_core::OsRng};
use shared::models::{User, UserCreate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const SELECT_USER: &str =
    "SELECT id, email, password_hash, name, role, created_at FROM users";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Create a user. A duplicate email is a conflict; role defaults to
/// "vendedor".
pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    if data.email.trim().is_empty() || data.name.trim().is_empty() || data.password.is_empty() {
        return Err(RepoError::Validation(
            "email, password and name are required".into(),
        ));
    }
    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "User '{}' already exists",
            data.email
        )));
    }

    let password_hash = hash_password(&data.password)?;
    let role = data.role.unwrap_or_else(|| "vendedor".to_string());

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, password_hash, name, role, created_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.email)
    .bind(&password_hash)
    .bind(&data.name)
    .bind(&role)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub fn hash_password(password: &str) -> RepoResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))
}

pub fn verify_password(password: &str, password_hash: &str) -> RepoResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| RepoError::Database(format!("Stored hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
