use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::CurrentUser;
use crate::models::RatingTarget;
use crate::views;
use actix_web::{get, web, Responder, Result};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub city: Option<String>,
}

#[tracing::instrument(name = "List places.", skip(pg_pool))]
#[get("/places")]
pub async fn list_handler(
    query: web::Query<PlacesQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let city = query.city.as_deref().map(str::trim).filter(|city| !city.is_empty());
    let places: Vec<views::place::Card> = db::place::fetch_all(pg_pool.get_ref(), city)
        .await
        .map_err(|err| JsonResponse::<views::place::Card>::build().internal_server_error(err))?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(JsonResponse::build().set_list(places).ok("OK"))
}

#[tracing::instrument(name = "Get place.", skip(pg_pool))]
#[get("/place/{id}")]
pub async fn item_handler(
    user: CurrentUser,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = path.0;
    let place = db::place::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<views::place::Page>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<views::place::Page>::build().not_found("Place not found"))?;

    let target = RatingTarget::Place(id);
    let summary = db::rating::summary(pg_pool.get_ref(), target)
        .await
        .map_err(|err| JsonResponse::<views::place::Page>::build().internal_server_error(err))?;
    let own_rating = match user.user() {
        Some(user) => db::rating::fetch_by_user_and_target(pg_pool.get_ref(), user.id, target)
            .await
            .map_err(|err| JsonResponse::<views::place::Page>::build().internal_server_error(err))?,
        None => None,
    };

    Ok(JsonResponse::build()
        .set_item(views::place::Page::new(place, summary, own_rating.as_ref()))
        .ok("OK"))
}
