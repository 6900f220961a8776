use crate::forms::FormRejection;
use serde::Deserialize;
use serde_valid::Validate;

#[derive(Deserialize, Debug, Default)]
pub struct RegisterForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Validate)]
pub struct Register {
    #[validate(min_length = 3)]
    #[validate(max_length = 64)]
    #[validate(pattern = r"^[A-Za-z0-9_.\-]+$")]
    pub username: String,
    #[validate(max_length = 255)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: String,
    #[validate(min_length = 8)]
    #[validate(max_length = 128)]
    pub password: String,
}

impl std::fmt::Debug for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Register")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize, Default)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

// passwords never reach the logs
impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Login {
    pub username: String,
    pub password: String,
}

impl RegisterForm {
    pub fn parse(&self) -> Result<Register, FormRejection> {
        let mut rejection = FormRejection::default();
        let username = rejection.required("username", self.username.as_ref());
        let email = rejection.required("email", self.email.as_ref());
        let password = match self.password.as_deref() {
            Some(password) if !password.is_empty() => Some(password.to_string()),
            _ => {
                rejection.add_error("password", "password is required");
                None
            }
        };

        let register = match (username, email, password) {
            (Some(username), Some(email), Some(password)) => Some(Register {
                username,
                email: email.to_lowercase(),
                password,
            }),
            _ => None,
        };
        let register = rejection.validated(register);
        // never echo the password
        rejection.fields.remove("password");
        rejection.finish(register)
    }
}

impl LoginForm {
    pub fn parse(&self) -> Result<Login, FormRejection> {
        let mut rejection = FormRejection::default();
        let username = rejection.required("username", self.username.as_ref());
        let password = match self.password.as_deref() {
            Some(password) if !password.is_empty() => Some(password.to_string()),
            _ => {
                rejection.add_error("password", "password is required");
                None
            }
        };

        let login = username
            .zip(password)
            .map(|(username, password)| Login { username, password });
        rejection.finish(login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, password: &str) -> RegisterForm {
        RegisterForm {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn valid_registration() {
        let register = register("anna.k", "Anna@Example.com", "correct horse").parse().unwrap();
        assert_eq!(register.username, "anna.k");
        assert_eq!(register.email, "anna@example.com");
    }

    #[test]
    fn invalid_registration_does_not_echo_password() {
        let rejection = register("a b", "not-an-email", "short").parse().unwrap_err();
        assert!(rejection.field_errors.contains_key("username"));
        assert!(rejection.field_errors.contains_key("email"));
        assert!(rejection.field_errors.contains_key("password"));
        assert!(!rejection.fields.contains_key("password"));
    }

    #[test]
    fn login_requires_both_fields() {
        let rejection = LoginForm {
            username: Some("anna".to_string()),
            password: None,
        }
        .parse()
        .unwrap_err();

        assert!(rejection.field_errors.contains_key("password"));
    }
}
