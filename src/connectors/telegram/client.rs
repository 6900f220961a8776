use super::TelegramNotifier;
use crate::configuration::TelegramSettings;
use crate::connectors::ConnectorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

pub struct TelegramClient {
    settings: TelegramSettings,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Bot API envelope, `description` is set when `ok` is false.
#[derive(Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(settings: TelegramSettings, http_client: reqwest::Client) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.settings.api_url.trim_end_matches('/'),
            self.settings.bot_token
        )
    }
}

#[async_trait]
impl TelegramNotifier for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<(), ConnectorError> {
        let span = tracing::info_span!("telegram_send_message", chat_id = %self.settings.chat_id);
        let payload = SendMessage {
            chat_id: &self.settings.chat_id,
            text,
        };

        let reply = self
            .http_client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .instrument(span)
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(ConnectorError::from)?
            .json::<BotApiReply>()
            .await
            .map_err(ConnectorError::from)?;

        if !reply.ok {
            return Err(ConnectorError::Rejected(
                reply.description.unwrap_or_else(|| "sendMessage failed".to_string()),
            ));
        }

        Ok(())
    }
}
