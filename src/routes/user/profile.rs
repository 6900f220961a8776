use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::CurrentUser;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Get own profile.", skip(pg_pool))]
#[get("")]
pub async fn profile_handler(
    user: CurrentUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.require(&[])?;
    let internal = |err: String| JsonResponse::<views::user::Profile>::build().internal_server_error(err);

    let favorites = db::product::fetch_favorites(pg_pool.get_ref(), user.id)
        .await
        .map_err(internal)?;
    let ratings = db::rating::fetch_by_user(pg_pool.get_ref(), user.id)
        .await
        .map_err(internal)?;

    Ok(JsonResponse::build()
        .set_id(user.id)
        .set_item(views::user::Profile::new(user, favorites, ratings))
        .ok("OK"))
}
