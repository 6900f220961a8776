use crate::configuration::Settings;
use crate::connectors::{MailMessage, Mailer};
use crate::helpers::JsonResponse;
use crate::middleware::authentication::CurrentUser;
use crate::services;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Send confirmation email.", skip(pg_pool, settings, mailer))]
#[post("/send-confirmation-email")]
pub async fn send_confirmation_email_handler(
    user: CurrentUser,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
    mailer: web::Data<Arc<dyn Mailer>>,
) -> Result<impl Responder> {
    let user = user.require(&[])?;
    let code = services::account::issue_activate_code(pg_pool.get_ref(), user).await?;

    let link = services::account::activation_link(&settings.public_url, &code);
    mailer
        .send(MailMessage::confirmation(&user.email, &user.username, &link))
        .await?;

    Ok(JsonResponse::<()>::build()
        .set_id(user.id)
        .ok("Confirmation email sent"))
}
