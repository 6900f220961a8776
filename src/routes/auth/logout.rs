use crate::configuration::Settings;
use crate::helpers::JsonResponse;
use crate::services;
use actix_web::{post, web, HttpRequest, HttpResponse, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Logout.", skip(req, pg_pool, settings))]
#[post("/logout")]
pub async fn logout_handler(
    req: HttpRequest,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse> {
    if let Some(cookie) = req.cookie(&settings.session.cookie_name) {
        services::account::logout(pg_pool.get_ref(), cookie.value()).await?;
    }

    let body = JsonResponse::<()>::build().to_json_response(true, "Logged out");
    Ok(HttpResponse::Ok()
        .cookie(super::removal_cookie(&settings.session))
        .json(body))
}
