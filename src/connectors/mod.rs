//! Outbound integrations.
//!
//! Every integration is a trait with an HTTP client implementation. Routes get
//! the trait object injected through `web::Data<Arc<dyn ...>>`, so they never
//! depend on HTTP details and unit tests can swap in a mock.

pub mod errors;
pub mod mailer;
pub mod telegram;

pub use errors::ConnectorError;
pub use mailer::{MailMessage, Mailer, MailerClient};
pub use telegram::{DisabledNotifier, TelegramClient, TelegramNotifier};

pub use mailer::init as init_mailer;
pub use telegram::init as init_telegram;
