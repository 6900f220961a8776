use crate::helpers::JsonResponse;
use crate::services;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Activate account.", skip(pg_pool, path))]
#[get("/activate/{code}")]
pub async fn activate_handler(
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let code = path.into_inner().0;

    match services::account::activate(pg_pool.get_ref(), &code).await? {
        Some(user) => {
            tracing::info!(user_id = %user.id, "Account activated");
            Ok(JsonResponse::<()>::build().set_id(user.id).ok("Account activated"))
        }
        None => Err(JsonResponse::<()>::build().not_found("Unknown activation code")),
    }
}
