use crate::forms;
use crate::helpers::{FileStorage, JsonResponse};
use crate::middleware::authentication::CurrentUser;
use crate::routes::storage::upload_extension;
use crate::services::{self, ServiceError};
use crate::views;
use actix_web::{post, web, HttpRequest, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Add comment.", skip(pg_pool))]
#[post("/comment")]
pub async fn add_comment_handler(
    user: CurrentUser,
    form: web::Form<forms::CommentForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.require(&[])?;
    let command = form.parse().map_err(ServiceError::from)?;

    let comment = services::comment::add(pg_pool.get_ref(), user, command).await?;
    Ok(JsonResponse::build()
        .set_id(comment.id)
        .set_item(views::comment::Comment::from(comment))
        .ok("Comment added"))
}

/// Attaches the raw request body as the next media file of a comment.
#[tracing::instrument(name = "Add comment media.", skip(req, body, pg_pool, storage))]
#[post("/comment/{id}/media")]
pub async fn comment_media_handler(
    req: HttpRequest,
    user: CurrentUser,
    path: web::Path<(Uuid,)>,
    body: web::Bytes,
    pg_pool: web::Data<PgPool>,
    storage: web::Data<FileStorage>,
) -> Result<impl Responder> {
    let user = user.require(&[])?;
    let extension = upload_extension(&req, &body)?;

    let comment = services::comment::attach_media(
        pg_pool.get_ref(),
        storage.get_ref(),
        user,
        path.0,
        extension,
        &body,
    )
    .await?;

    Ok(JsonResponse::build()
        .set_id(comment.id)
        .set_item(views::comment::Comment::from(comment))
        .ok("Media added"))
}
