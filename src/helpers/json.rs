use crate::forms::FormRejection;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde_derive::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Envelope of every action/loader reply.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
}

#[derive(Debug)]
pub struct JsonResponseBuilder<T> {
    id: Option<Uuid>,
    item: Option<T>,
    list: Option<Vec<T>>,
    rejection: Option<FormRejection>,
}

impl<T> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self {
            id: None,
            item: None,
            list: None,
            rejection: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub fn set_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn set_rejection(mut self, rejection: FormRejection) -> Self {
        self.rejection = Some(rejection);
        self
    }

    pub fn to_json_response(self, success: bool, message: impl Into<String>) -> JsonResponse<T> {
        let (field_errors, fields, form_error) = match self.rejection {
            Some(rejection) => (
                Some(rejection.field_errors),
                Some(rejection.fields),
                rejection.form_error,
            ),
            None => (None, None, None),
        };

        JsonResponse {
            success,
            message: message.into(),
            id: self.id,
            item: self.item,
            list: self.list,
            field_errors,
            fields,
            form_error,
        }
    }

    pub fn ok(self, message: impl Into<String>) -> web::Json<JsonResponse<T>> {
        web::Json(self.to_json_response(true, message))
    }

    pub fn to_http_response(self, status: StatusCode, message: impl Into<String>) -> HttpResponse {
        let body = self.to_json_response(status.is_success(), message);
        HttpResponse::build(status).json(body)
    }

    pub fn error(self, status: StatusCode, message: impl Into<String>) -> actix_web::Error {
        let message = message.into();
        let response = self.to_http_response(status, message.clone());
        InternalError::from_response(message, response).into()
    }

    pub fn bad_request(self, message: impl Into<String>) -> actix_web::Error {
        self.error(StatusCode::BAD_REQUEST, message)
    }

    pub fn form_error(self, rejection: FormRejection) -> actix_web::Error {
        let message = rejection.to_string();
        self.set_rejection(rejection).bad_request(message)
    }

    pub fn unauthorized(self, message: impl Into<String>) -> actix_web::Error {
        self.error(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(self, message: impl Into<String>) -> actix_web::Error {
        self.error(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(self, message: impl Into<String>) -> actix_web::Error {
        self.error(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_server_error(self, message: impl Into<String>) -> actix_web::Error {
        let message = message.into();
        let message = if message.trim().is_empty() {
            String::from("Internal error")
        } else {
            message
        };
        self.error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}
