use super::{MailMessage, Mailer};
use crate::configuration::MailerSettings;
use crate::connectors::ConnectorError;
use async_trait::async_trait;
use serde::Serialize;
use tracing::Instrument;

pub struct MailerClient {
    settings: MailerSettings,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    #[serde(flatten)]
    message: &'a MailMessage,
}

impl MailerClient {
    pub fn new(settings: MailerSettings, http_client: reqwest::Client) -> Self {
        Self {
            settings,
            http_client,
        }
    }
}

#[async_trait]
impl Mailer for MailerClient {
    async fn send(&self, message: MailMessage) -> Result<(), ConnectorError> {
        let span = tracing::info_span!("mail_relay_send", to = %message.to);
        let payload = RelayRequest {
            from: &self.settings.from,
            message: &message,
        };

        self.http_client
            .post(&self.settings.relay_url)
            .json(&payload)
            .send()
            .instrument(span)
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(ConnectorError::from)?;

        Ok(())
    }
}
