use crate::forms;
use crate::helpers::{FileStorage, JsonResponse};
use crate::middleware::authentication::CurrentUser;
use crate::services;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Delete place.", skip(pg_pool, storage))]
#[post("/delete-place")]
pub async fn delete_place_handler(
    user: CurrentUser,
    form: web::Form<forms::DeletePlaceForm>,
    pg_pool: web::Data<PgPool>,
    storage: web::Data<FileStorage>,
) -> Result<impl Responder> {
    let place =
        services::catalog::delete_place(pg_pool.get_ref(), storage.get_ref(), user.user(), &form)
            .await?;

    Ok(JsonResponse::<()>::build().set_id(place.id).ok("Place deleted"))
}

#[tracing::instrument(name = "Delete product.", skip(pg_pool, storage))]
#[post("/delete-product")]
pub async fn delete_product_handler(
    user: CurrentUser,
    form: web::Form<forms::DeleteProductForm>,
    pg_pool: web::Data<PgPool>,
    storage: web::Data<FileStorage>,
) -> Result<impl Responder> {
    let product =
        services::catalog::delete_product(pg_pool.get_ref(), storage.get_ref(), user.user(), &form)
            .await?;

    Ok(JsonResponse::<()>::build().set_id(product.id).ok("Product deleted"))
}

#[tracing::instrument(name = "Delete user.", skip(pg_pool, storage))]
#[post("/delete-user")]
pub async fn delete_user_handler(
    user: CurrentUser,
    form: web::Form<forms::DeleteUserForm>,
    pg_pool: web::Data<PgPool>,
    storage: web::Data<FileStorage>,
) -> Result<impl Responder> {
    let deleted =
        services::catalog::delete_user(pg_pool.get_ref(), storage.get_ref(), user.user(), &form)
            .await?;

    Ok(JsonResponse::<()>::build().set_id(deleted.id).ok("User deleted"))
}
