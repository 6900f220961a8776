use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::CurrentUser;
use crate::models::{ProductType, RatingTarget};
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "List active products.", skip(pg_pool))]
#[get("/products")]
pub async fn list_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let products: Vec<views::product::Card> = db::product::fetch_active(pg_pool.get_ref(), None)
        .await
        .map_err(|err| JsonResponse::<views::product::Card>::build().internal_server_error(err))?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(JsonResponse::build().set_list(products).ok("OK"))
}

#[tracing::instrument(name = "List products of category.", skip(pg_pool))]
#[get("/products/{category}")]
pub async fn category_handler(
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let category = path
        .0
        .parse::<ProductType>()
        .map_err(|err| JsonResponse::<views::product::Card>::build().not_found(err.to_string()))?;

    let products: Vec<views::product::Card> = db::product::fetch_active(pg_pool.get_ref(), Some(category))
        .await
        .map_err(|err| JsonResponse::<views::product::Card>::build().internal_server_error(err))?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(JsonResponse::build().set_list(products).ok("OK"))
}

#[tracing::instrument(name = "Get product.", skip(pg_pool))]
#[get("/product/{id}")]
pub async fn item_handler(
    user: CurrentUser,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = path.0;
    let pool = pg_pool.get_ref();
    let internal = |err: String| JsonResponse::<views::product::Page>::build().internal_server_error(err);

    let product = db::product::fetch(pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| JsonResponse::<views::product::Page>::build().not_found("Product not found"))?;

    let target = RatingTarget::Product(id);
    let tags = db::tag::fetch_by_product(pool, id).await.map_err(internal)?;
    let summary = db::rating::summary(pool, target).await.map_err(internal)?;
    let comments = db::comment::fetch_by_product(pool, id).await.map_err(internal)?;
    let mut page = views::product::Page::new(product, tags, summary, comments);

    if let Some(user) = user.user() {
        let favorite = db::favorite::is_favorite(pool, user.id, id)
            .await
            .map_err(internal)?;
        let own_rating = db::rating::fetch_by_user_and_target(pool, user.id, target)
            .await
            .map_err(internal)?;
        page = page.with_visitor(favorite, own_rating.as_ref());
    }

    Ok(JsonResponse::build().set_item(page).ok("OK"))
}
