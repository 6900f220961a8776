use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;

#[tracing::instrument(name = "Health check.", skip(pg_pool))]
#[get("")]
pub async fn health_check(pg_pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pg_pool.get_ref())
        .await
    {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(err) => {
            tracing::error!("Database is unreachable: {:?}", err);
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}
