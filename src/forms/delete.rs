use crate::forms::FormRejection;
use crate::helpers::redirect::safe_redirect_target;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeletePlaceForm {
    pub place_id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductForm {
    pub product_id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserForm {
    pub user_id: Option<String>,
}

impl DeletePlaceForm {
    pub fn parse(&self) -> Result<Uuid, FormRejection> {
        let mut rejection = FormRejection::default();
        let id = rejection.uuid("placeId", self.place_id.as_ref());
        rejection.finish(id)
    }
}

impl DeleteProductForm {
    pub fn parse(&self) -> Result<Uuid, FormRejection> {
        let mut rejection = FormRejection::default();
        let id = rejection.uuid("productId", self.product_id.as_ref());
        rejection.finish(id)
    }
}

impl DeleteUserForm {
    pub fn parse(&self) -> Result<Uuid, FormRejection> {
        let mut rejection = FormRejection::default();
        let id = rejection.uuid("userId", self.user_id.as_ref());
        rejection.finish(id)
    }
}

/// Removal of a rating or comment followed by a redirect.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RemoveForm {
    pub id: Option<String>,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remove {
    pub id: Uuid,
    pub redirect_to: String,
}

impl RemoveForm {
    pub fn parse(&self) -> Result<Remove, FormRejection> {
        let mut rejection = FormRejection::default();
        let id = rejection.uuid("id", self.id.as_ref());
        let redirect_to = rejection.optional("redirectTo", self.redirect_to.as_ref());

        let remove = id.map(|id| Remove {
            id,
            redirect_to: safe_redirect_target(redirect_to.as_deref()),
        });
        rejection.finish(remove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_id_is_rejected() {
        let rejection = DeleteUserForm::default().parse().unwrap_err();
        assert_eq!(rejection.field_errors["userId"], "userId is required");
    }

    #[test]
    fn remove_form_sanitizes_redirect() {
        let id = Uuid::new_v4();
        let remove = RemoveForm {
            id: Some(id.to_string()),
            redirect_to: Some("https://elsewhere.example/".to_string()),
        }
        .parse()
        .unwrap();

        assert_eq!(remove, Remove { id, redirect_to: "/".to_string() });
    }
}
