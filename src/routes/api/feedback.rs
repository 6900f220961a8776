use crate::connectors::TelegramNotifier;
use crate::forms::Feedback;
use crate::helpers::JsonResponse;
use crate::services::ServiceError;
use actix_web::{post, web, Responder, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

#[tracing::instrument(name = "Send feedback.", skip(form, notifier))]
#[post("/send-feedback")]
pub async fn send_feedback_handler(
    form: web::Form<BTreeMap<String, String>>,
    notifier: web::Data<Arc<dyn TelegramNotifier>>,
) -> Result<impl Responder> {
    let feedback = Feedback::parse(form.into_inner()).map_err(ServiceError::from)?;
    let message = feedback.to_message();
    tracing::info!(fields = ?feedback.fields.keys().collect::<Vec<_>>(), "{}", message);

    if notifier.is_enabled() {
        notifier.send_message(&message).await.map_err(|err| {
            tracing::error!("Failed to forward feedback: {}", err);
            JsonResponse::<()>::build().internal_server_error("Failed to send feedback")
        })?;
    }

    Ok(JsonResponse::<()>::build().ok("Feedback sent"))
}
