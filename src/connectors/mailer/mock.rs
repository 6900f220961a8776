use super::{MailMessage, Mailer};
use crate::connectors::ConnectorError;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockMailer {
    pub outbox: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, message: MailMessage) -> Result<(), ConnectorError> {
        self.outbox.lock().unwrap().push(message);
        Ok(())
    }
}
