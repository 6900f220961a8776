use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::CurrentUser;
use crate::models::Role;
use crate::services;
use crate::views;
use actix_web::{get, post, put, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Admin list products.", skip(pg_pool))]
#[get("/products")]
pub async fn admin_list_products_handler(
    user: CurrentUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    user.require(&[Role::Admin])?;

    let products: Vec<views::product::Admin> = db::product::fetch_all(pg_pool.get_ref())
        .await
        .map_err(|err| JsonResponse::<views::product::Admin>::build().internal_server_error(err))?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(JsonResponse::build().set_list(products).ok("OK"))
}

#[tracing::instrument(name = "Admin create product.", skip(pg_pool))]
#[post("/products")]
pub async fn admin_create_product_handler(
    user: CurrentUser,
    form: web::Form<forms::ProductForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let product = services::catalog::create_product(pg_pool.get_ref(), user.user(), &form).await?;

    Ok(JsonResponse::build()
        .set_id(product.id)
        .set_item(views::product::Admin::from(product))
        .ok("Product created"))
}

#[tracing::instrument(name = "Admin update product.", skip(pg_pool))]
#[put("/products/{id}")]
pub async fn admin_update_product_handler(
    user: CurrentUser,
    path: web::Path<(Uuid,)>,
    form: web::Form<forms::ProductForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let product =
        services::catalog::update_product(pg_pool.get_ref(), user.user(), path.0, &form).await?;

    Ok(JsonResponse::build()
        .set_id(product.id)
        .set_item(views::product::Admin::from(product))
        .ok("Product updated"))
}
