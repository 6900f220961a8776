use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::CurrentUser;
use crate::services::{self, ServiceError};
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Toggle favorite product.", skip(pg_pool))]
#[post("/favorites")]
pub async fn favorites_handler(
    user: CurrentUser,
    form: web::Form<forms::FavoriteForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.require(&[])?;
    let command = form.parse().map_err(ServiceError::from)?;

    let state = services::favorite::toggle(pg_pool.get_ref(), user, command).await?;
    let message = if state.favorite {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };

    Ok(JsonResponse::build()
        .set_id(state.product_id)
        .set_item(state)
        .ok(message))
}
