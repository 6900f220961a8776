use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by username.");
    sqlx::query_as::<_, models::User>(r"SELECT * FROM app_user WHERE username = $1 LIMIT 1")
        .bind(username)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch user by username, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn exists_with_username_or_email(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> Result<bool, String> {
    let query_span = tracing::info_span!("Check username or email is taken.");
    sqlx::query_scalar::<_, bool>(
        r"SELECT EXISTS(SELECT 1 FROM app_user WHERE username = $1 OR email = $2)",
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to check user existence, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::User>, String> {
    let query_span = tracing::info_span!("Fetch all users.");
    sqlx::query_as::<_, models::User>(r"SELECT * FROM app_user ORDER BY created_at DESC")
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch users, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn insert(pool: &PgPool, user: models::User) -> Result<models::User, String> {
    let query_span = tracing::info_span!("Saving new user into the database");
    sqlx::query_as::<_, models::User>(
        r#"
        INSERT INTO app_user (id, username, email, password_hash, role, activate_code, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role.as_str())
    .bind(&user.activate_code)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update_role(
    pool: &PgPool,
    id: Uuid,
    role: models::Role,
) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Updating user role");
    sqlx::query_as::<_, models::User>(r"UPDATE app_user SET role = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to update".to_string()
        })
}

pub async fn set_activate_code(pool: &PgPool, id: Uuid, code: &str) -> Result<(), String> {
    let query_span = tracing::info_span!("Storing activation code");
    sqlx::query(r"UPDATE app_user SET activate_code = $2 WHERE id = $1")
        .bind(id)
        .bind(code)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to update".to_string()
        })
}

/// Marks the owner of `code` as activated and consumes the code.
pub async fn activate(pool: &PgPool, code: &str) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Activating user by code");
    sqlx::query_as::<_, models::User>(
        r#"
        UPDATE app_user
        SET activated_at = NOW(), activate_code = NULL
        WHERE activate_code = $1
        RETURNING *
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

pub async fn set_avatar(pool: &PgPool, id: Uuid, avatar: &str) -> Result<(), String> {
    let query_span = tracing::info_span!("Updating user avatar");
    sqlx::query(r"UPDATE app_user SET avatar = $2 WHERE id = $1")
        .bind(id)
        .bind(avatar)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to update".to_string()
        })
}

#[tracing::instrument(name = "Delete user.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<models::User>, String> {
    sqlx::query_as::<_, models::User>(r"DELETE FROM app_user WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete user, error: {:?}", err);
            "Failed to delete".to_string()
        })
}
