//! Telegram bot notifications (feedback forwarding).

use crate::configuration::TelegramSettings;
use crate::connectors::ConnectorError;
use actix_web::web;
use async_trait::async_trait;
use std::sync::Arc;

pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::TelegramClient;
#[cfg(test)]
pub use mock::MockNotifier;

#[async_trait]
pub trait TelegramNotifier: Send + Sync {
    /// Posts `text` to the configured chat.
    async fn send_message(&self, text: &str) -> Result<(), ConnectorError>;

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Used when `TG_BOT_TOKEN` / `TG_CHAT_ID` are not configured.
pub struct DisabledNotifier;

#[async_trait]
impl TelegramNotifier for DisabledNotifier {
    async fn send_message(&self, text: &str) -> Result<(), ConnectorError> {
        tracing::debug!(chars = text.len(), "Telegram disabled, message dropped");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

pub fn init(
    settings: Option<&TelegramSettings>,
    http_client: reqwest::Client,
) -> web::Data<Arc<dyn TelegramNotifier>> {
    let notifier: Arc<dyn TelegramNotifier> = match settings {
        Some(settings) => {
            tracing::info!("Initializing Telegram notifier: {}", settings.api_url);
            Arc::new(TelegramClient::new(settings.clone(), http_client))
        }
        None => {
            tracing::warn!("Telegram notifier disabled");
            Arc::new(DisabledNotifier)
        }
    };

    web::Data::new(notifier)
}
