use crate::middleware::authorization::{self, DenyReason};
use crate::models::{Role, User};
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::sync::Arc;

/// The user resolved by the authentication middleware, if any.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(Option<Arc<User>>);

impl CurrentUser {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(&self) -> Option<&User> {
        self.0.as_deref()
    }

    pub fn require(&self, roles: &[Role]) -> Result<&User, DenyReason> {
        authorization::require(self.user(), roles)
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self(Some(Arc::new(user)))
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(CurrentUser(req.extensions().get::<Arc<User>>().cloned())))
    }
}
