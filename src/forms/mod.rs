//! Form payloads of the action routes.
//!
//! Every form is received as raw optional strings and parsed into a typed
//! command. Parsing collects all problems into a [`FormRejection`], so invalid
//! input is answered with a 400 before anything reaches the database.

pub mod auth;
pub mod comment;
pub mod delete;
pub mod favorite;
pub mod feedback;
pub mod place;
pub mod product;
pub mod rating;
pub mod user;

pub use auth::{Login, LoginForm, Register, RegisterForm};
pub use comment::{CommentForm, NewComment};
pub use delete::{DeletePlaceForm, DeleteProductForm, DeleteUserForm, Remove, RemoveForm};
pub use favorite::{Favorite, FavoriteForm, Intent};
pub use feedback::Feedback;
pub use place::{PlaceForm, PlaceInput};
pub use product::{ProductForm, ProductInput};
pub use rating::{Rate, RatePlaceForm, RateProductForm};
pub use user::RoleForm;

use serde::Serialize;
use serde_valid::validation::Errors;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRejection {
    pub field_errors: BTreeMap<String, String>,
    /// submitted values echoed back so the client can refill the form
    pub fields: BTreeMap<String, String>,
    pub form_error: Option<String>,
}

impl FormRejection {
    pub fn form(message: impl Into<String>) -> Self {
        Self {
            form_error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn add_field(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn set_form_error(&mut self, message: impl Into<String>) {
        self.form_error = Some(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.form_error.is_none()
    }

    /// Hands out `value` only when nothing was rejected.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, FormRejection> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            Some(_) => Err(self),
            None if self.is_empty() => Err(FormRejection::form("Form not submitted correctly.")),
            None => Err(self),
        }
    }

    fn echo(&mut self, field: &str, value: Option<&String>) {
        if let Some(value) = value {
            self.add_field(field, value.clone());
        }
    }

    /// Required, trimmed, non-empty string field.
    pub(crate) fn required(&mut self, field: &str, value: Option<&String>) -> Option<String> {
        self.echo(field, value);
        match value.map(|v| v.trim()) {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            _ => {
                self.add_error(field, format!("{field} is required"));
                None
            }
        }
    }

    /// Optional string field, blank values count as absent.
    pub(crate) fn optional(&mut self, field: &str, value: Option<&String>) -> Option<String> {
        self.echo(field, value);
        value
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub(crate) fn uuid(&mut self, field: &str, value: Option<&String>) -> Option<Uuid> {
        let value = self.required(field, value)?;
        match Uuid::parse_str(&value) {
            Ok(id) => Some(id),
            Err(_) => {
                self.add_error(field, format!("{field} is not a valid id"));
                None
            }
        }
    }

    /// Runs the derived `serde_valid` rules of a parsed command. Property
    /// violations land on their form field, the rest on the form itself.
    pub(crate) fn validated<T: serde_valid::Validate>(&mut self, value: Option<T>) -> Option<T> {
        let value = value?;
        match value.validate() {
            Ok(()) => Some(value),
            Err(Errors::Object(object)) => {
                for (property, errors) in object.properties {
                    self.add_error(&field_name(&property), join_errors(errors));
                }
                if !object.errors.is_empty() {
                    self.set_form_error(join_messages(&object.errors));
                }
                None
            }
            Err(errors) => {
                self.set_form_error(join_errors(errors));
                None
            }
        }
    }
}

fn join_messages(errors: &[serde_valid::validation::Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_errors(errors: Errors) -> String {
    match errors {
        Errors::NewType(errors) => join_messages(&errors),
        other => other.to_string(),
    }
}

/// `product_type` -> `productType`, matching the submitted form names.
fn field_name(property: &str) -> String {
    let mut name = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

impl fmt::Display for FormRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(form_error) = &self.form_error {
            return f.write_str(form_error);
        }

        let errors = self
            .field_errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Invalid form: {}", errors)
    }
}

impl std::error::Error for FormRejection {}
