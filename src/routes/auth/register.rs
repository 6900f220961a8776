use crate::configuration::Settings;
use crate::connectors::{MailMessage, Mailer};
use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::{self, ServiceError};
use crate::views;
use actix_web::{post, web, HttpResponse, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Register user.", skip(form, pg_pool, settings, mailer))]
#[post("/register")]
pub async fn register_handler(
    form: web::Form<forms::RegisterForm>,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
    mailer: web::Data<Arc<dyn Mailer>>,
) -> Result<HttpResponse> {
    let command = form.parse().map_err(ServiceError::from)?;
    let ttl = chrono::Duration::hours(settings.session.ttl_hours);

    let signed_in = services::account::register(pg_pool.get_ref(), command, ttl).await?;
    let user = &signed_in.user;

    if let Some(code) = user.activate_code.as_deref() {
        let link = services::account::activation_link(&settings.public_url, code);
        let message = MailMessage::confirmation(&user.email, &user.username, &link);
        // the account exists already, the mail can be re-sent later
        if let Err(err) = mailer.send(message).await {
            tracing::error!("Failed to send confirmation email: {}", err);
        }
    }

    let body = JsonResponse::build()
        .set_id(user.id)
        .set_item(views::user::Profile::new(user, vec![], vec![]))
        .to_json_response(true, "Registered");

    Ok(HttpResponse::Ok()
        .cookie(super::session_cookie(&settings.session, &signed_in))
        .json(body))
}
