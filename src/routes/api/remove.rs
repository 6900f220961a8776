use crate::forms;
use crate::helpers::redirect::see_other;
use crate::helpers::FileStorage;
use crate::middleware::authentication::CurrentUser;
use crate::services::{self, ServiceError};
use actix_web::{post, web, HttpResponse, Result};
use sqlx::PgPool;

/// Removes a vote and redirects back to the page it was issued from.
#[tracing::instrument(name = "Remove rating.", skip(pg_pool))]
#[post("/del-rating")]
pub async fn del_rating_handler(
    user: CurrentUser,
    form: web::Form<forms::RemoveForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let user = user.require(&[])?;
    let remove = form.parse().map_err(ServiceError::from)?;

    services::rating::delete(pg_pool.get_ref(), user, remove.id).await?;
    Ok(see_other(&remove.redirect_to))
}

#[tracing::instrument(name = "Remove comment.", skip(pg_pool, storage))]
#[post("/del-comment")]
pub async fn del_comment_handler(
    user: CurrentUser,
    form: web::Form<forms::RemoveForm>,
    pg_pool: web::Data<PgPool>,
    storage: web::Data<FileStorage>,
) -> Result<HttpResponse> {
    let user = user.require(&[])?;
    let remove = form.parse().map_err(ServiceError::from)?;

    services::comment::delete(pg_pool.get_ref(), storage.get_ref(), user, remove.id).await?;
    Ok(see_other(&remove.redirect_to))
}
