//! Role policy shared by every gated handler.

use crate::helpers::JsonResponse;
use crate::models::{Role, User};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenyReason {
    #[error("Authentication required")]
    Anonymous,
    #[error("Role `{role}` is not allowed to perform this action")]
    Forbidden { role: Role },
    #[error("Only the owner can perform this action")]
    NotOwner,
}

/// An empty `required` set admits any authenticated user.
pub fn authorize(session: Option<&User>, required: &[Role]) -> Decision {
    match session {
        None => Decision::Deny(DenyReason::Anonymous),
        Some(_) if required.is_empty() => Decision::Allow,
        Some(user) if required.contains(&user.role) => Decision::Allow,
        Some(user) => Decision::Deny(DenyReason::Forbidden { role: user.role }),
    }
}

/// Same as [`authorize`] but hands back the authorized user.
pub fn require<'a>(session: Option<&'a User>, required: &[Role]) -> Result<&'a User, DenyReason> {
    match authorize(session, required) {
        Decision::Allow => session.ok_or(DenyReason::Anonymous),
        Decision::Deny(reason) => Err(reason),
    }
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl ResponseError for DenyReason {
    fn status_code(&self) -> StatusCode {
        match self {
            DenyReason::Anonymous => StatusCode::UNAUTHORIZED,
            DenyReason::Forbidden { .. } | DenyReason::NotOwner => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        JsonResponse::<()>::build().to_http_response(self.status_code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_always_denied() {
        assert_eq!(authorize(None, &[]), Decision::Deny(DenyReason::Anonymous));
        assert_eq!(
            authorize(None, &[Role::User]),
            Decision::Deny(DenyReason::Anonymous)
        );
    }

    #[test]
    fn empty_role_set_admits_any_user() {
        let user = User::fixture(Role::User);
        assert!(authorize(Some(&user), &[]).is_allowed());
    }

    #[test]
    fn role_must_be_in_the_allowed_set() {
        let owner = User::fixture(Role::Placeowner);
        let creator = User::fixture(Role::Creator);
        let allowed = [Role::Admin, Role::Placeowner];

        assert!(authorize(Some(&owner), &allowed).is_allowed());
        assert_eq!(
            authorize(Some(&creator), &allowed),
            Decision::Deny(DenyReason::Forbidden {
                role: Role::Creator
            })
        );
    }

    #[test]
    fn require_returns_the_user() {
        let admin = User::fixture(Role::Admin);
        let user = require(Some(&admin), &[Role::Admin]).unwrap();
        assert_eq!(user.id, admin.id);
    }
}
