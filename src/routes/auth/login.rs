use crate::configuration::Settings;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::{self, ServiceError};
use actix_web::{post, web, HttpResponse, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Login.", skip(pg_pool, settings))]
#[post("/login")]
pub async fn login_handler(
    form: web::Form<forms::LoginForm>,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse> {
    let command = form.parse().map_err(ServiceError::from)?;
    let ttl = chrono::Duration::hours(settings.session.ttl_hours);

    let signed_in = services::account::login(pg_pool.get_ref(), command, ttl).await?;
    tracing::info!(user_id = %signed_in.user.id, "Logged in");

    let body = JsonResponse::<()>::build()
        .set_id(signed_in.user.id)
        .to_json_response(true, "Logged in");

    Ok(HttpResponse::Ok()
        .cookie(super::session_cookie(&settings.session, &signed_in))
        .json(body))
}
