use crate::forms::FormRejection;
use crate::models::Role;
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct RoleForm {
    pub role: Option<String>,
}

impl RoleForm {
    pub fn parse(&self) -> Result<Role, FormRejection> {
        let mut rejection = FormRejection::default();
        let role = match rejection.required("role", self.role.as_ref()) {
            Some(value) => match value.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    rejection.add_error("role", err.to_string());
                    None
                }
            },
            None => None,
        };

        rejection.finish(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles_only() {
        let form = RoleForm {
            role: Some("placeowner".to_string()),
        };
        assert_eq!(form.parse().unwrap(), Role::Placeowner);

        let form = RoleForm {
            role: Some("root".to_string()),
        };
        assert!(form.parse().is_err());
    }
}
