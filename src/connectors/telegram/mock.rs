use super::TelegramNotifier;
use crate::connectors::ConnectorError;
use async_trait::async_trait;
use std::sync::Mutex;

/// Records messages instead of sending them.
#[derive(Default)]
pub struct MockNotifier {
    pub sent: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl TelegramNotifier for MockNotifier {
    async fn send_message(&self, text: &str) -> Result<(), ConnectorError> {
        if self.fail {
            return Err(ConnectorError::ServiceUnavailable("mock failure".to_string()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
