//! Transactional mail (account confirmation) through an HTTP mail relay.

use crate::configuration::MailerSettings;
use crate::connectors::ConnectorError;
use actix_web::web;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::MailerClient;
#[cfg(test)]
pub use mock::MockMailer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl MailMessage {
    pub fn confirmation(to: &str, username: &str, link: &str) -> Self {
        MailMessage {
            to: to.to_string(),
            subject: "Confirm your account".to_string(),
            text: format!(
                "Hello {},\n\nfollow the link below to activate your account:\n{}\n",
                username, link
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), ConnectorError>;
}

pub fn init(settings: &MailerSettings, http_client: reqwest::Client) -> web::Data<Arc<dyn Mailer>> {
    tracing::info!("Initializing mail relay: {}", settings.relay_url);
    let mailer: Arc<dyn Mailer> = Arc::new(MailerClient::new(settings.clone(), http_client));

    web::Data::new(mailer)
}
