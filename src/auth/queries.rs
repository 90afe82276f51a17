//! Database queries for users.

use sqlx::PgPool;

use crate::error::AppError;

use super::models::{RegisterResponse, User};

/// Find a user by email
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, user_name, password, user_role, email
        FROM "user"
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert a user without a role. Returns `None` if the email is taken.
pub async fn insert_user(
    pool: &PgPool,
    user_name: &str,
    email: &str,
    password: &str,
) -> Result<Option<RegisterResponse>, AppError> {
    let user = sqlx::query_as::<_, RegisterResponse>(
        r#"
        INSERT INTO "user" (user_name, password, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        RETURNING user_id, user_name, email
        "#,
    )
    .bind(user_name)
    .bind(password)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
