use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::CurrentUser;
use crate::services::{self, catalog::USER_MANAGERS};
use crate::views;
use actix_web::{get, put, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Admin list users.", skip(pg_pool))]
#[get("/users")]
pub async fn admin_list_users_handler(
    user: CurrentUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    user.require(USER_MANAGERS)?;

    let users: Vec<views::user::Admin> = db::user::fetch_all(pg_pool.get_ref())
        .await
        .map_err(|err| JsonResponse::<views::user::Admin>::build().internal_server_error(err))?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(JsonResponse::build().set_list(users).ok("OK"))
}

#[tracing::instrument(name = "Admin change role.", skip(pg_pool))]
#[put("/users/{id}/role")]
pub async fn admin_change_role_handler(
    user: CurrentUser,
    path: web::Path<(Uuid,)>,
    form: web::Form<forms::RoleForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let updated =
        services::catalog::change_role(pg_pool.get_ref(), user.user(), path.0, &form).await?;

    Ok(JsonResponse::build()
        .set_id(updated.id)
        .set_item(views::user::Admin::from(updated))
        .ok("Role updated"))
}
