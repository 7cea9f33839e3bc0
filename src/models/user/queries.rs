use crate::db::DbPool;
use crate::errors::AppError;
use crate::serializers::FieldErrors;
use super::types::{NewUser, User};

pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

const SELECT_USER: &str =
    "SELECT id, username, password, date_joined, last_login FROM users";

pub async fn find_by_username(pool: &DbPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE username = $1"))
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Insert a user and return its id. A taken username is reported as a
/// field error on `username`, including when a concurrent insert wins.
pub async fn create(pool: &DbPool, new: &NewUser) -> Result<i64, AppError> {
    if find_by_username(pool, &new.username).await?.is_some() {
        return Err(FieldErrors::single("username", DUPLICATE_USERNAME).into());
    }

    let result = sqlx::query("INSERT INTO users (username, password) VALUES ($1, $2)")
        .bind(&new.username)
        .bind(&new.password)
        .execute(pool)
        .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(FieldErrors::single("username", DUPLICATE_USERNAME).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Stamp `last_login` with the current UTC time.
pub async fn record_login(pool: &DbPool, id: i64) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE users SET last_login = strftime('%Y-%m-%dT%H:%M:%SZ', 'now') WHERE id = $1",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
