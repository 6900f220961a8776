use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::CurrentUser;
use crate::services::{self, rating::RateOutcome, ServiceError};
use crate::views;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;

fn outcome_message(result: &views::rating::RateResult) -> &'static str {
    match result.outcome {
        RateOutcome::Created => "Rating saved",
        RateOutcome::Updated => "Rating updated",
        RateOutcome::Deleted => "Rating removed",
        RateOutcome::Unchanged => "Nothing to remove",
    }
}

#[tracing::instrument(name = "Rate product.", skip(pg_pool))]
#[post("/rate-product")]
pub async fn rate_product_handler(
    user: CurrentUser,
    form: web::Form<forms::RateProductForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.require(&[])?;
    let command = form.parse().map_err(ServiceError::from)?;

    let result = services::rating::rate(pg_pool.get_ref(), user, command).await?;
    let message = outcome_message(&result);
    Ok(JsonResponse::build().set_item(result).ok(message))
}

#[tracing::instrument(name = "Rate place.", skip(pg_pool))]
#[post("/rate-place")]
pub async fn rate_place_handler(
    user: CurrentUser,
    form: web::Form<forms::RatePlaceForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.require(&[])?;
    let command = form.parse().map_err(ServiceError::from)?;

    let result = services::rating::rate(pg_pool.get_ref(), user, command).await?;
    let message = outcome_message(&result);
    Ok(JsonResponse::build().set_item(result).ok(message))
}
