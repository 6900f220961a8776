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

#[tracing::instrument(name = "Admin list places.", skip(pg_pool))]
#[get("/places")]
pub async fn admin_list_places_handler(
    user: CurrentUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    user.require(&[Role::Admin])?;

    let places: Vec<views::place::Admin> = db::place::fetch_all(pg_pool.get_ref(), None)
        .await
        .map_err(|err| JsonResponse::<views::place::Admin>::build().internal_server_error(err))?
        .into_iter()
        .map(|rated| views::place::Admin::from(rated.place))
        .collect();

    Ok(JsonResponse::build().set_list(places).ok("OK"))
}

#[tracing::instrument(name = "Admin create place.", skip(pg_pool))]
#[post("/places")]
pub async fn admin_create_place_handler(
    user: CurrentUser,
    form: web::Form<forms::PlaceForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let place = services::catalog::create_place(pg_pool.get_ref(), user.user(), &form).await?;

    Ok(JsonResponse::build()
        .set_id(place.id)
        .set_item(views::place::Admin::from(place))
        .ok("Place created"))
}

#[tracing::instrument(name = "Admin update place.", skip(pg_pool))]
#[put("/places/{id}")]
pub async fn admin_update_place_handler(
    user: CurrentUser,
    path: web::Path<(Uuid,)>,
    form: web::Form<forms::PlaceForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let place =
        services::catalog::update_place(pg_pool.get_ref(), user.user(), path.0, &form).await?;

    Ok(JsonResponse::build()
        .set_id(place.id)
        .set_item(views::place::Admin::from(place))
        .ok("Place updated"))
}
