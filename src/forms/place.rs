use crate::forms::FormRejection;
use serde::Deserialize;
use serde_valid::Validate;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceForm {
    pub name: Option<String>,
    pub short: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct PlaceInput {
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(max_length = 512)]
    pub short: Option<String>,
    #[validate(max_length = 20000)]
    pub description: Option<String>,
    #[validate(max_length = 128)]
    pub city: String,
    #[validate(max_length = 255)]
    pub address: Option<String>,
}

impl PlaceForm {
    pub fn parse(&self) -> Result<PlaceInput, FormRejection> {
        let mut rejection = FormRejection::default();
        let name = rejection.required("name", self.name.as_ref());
        let short = rejection.optional("short", self.short.as_ref());
        let description = rejection.optional("description", self.description.as_ref());
        let city = rejection.required("city", self.city.as_ref());
        let address = rejection.optional("address", self.address.as_ref());

        let input = name.zip(city).map(|(name, city)| PlaceInput {
            name,
            short,
            description,
            city,
            address,
        });
        let input = rejection.validated(input);
        rejection.finish(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_is_required() {
        let rejection = PlaceForm {
            name: Some("Old fortress".to_string()),
            ..Default::default()
        }
        .parse()
        .unwrap_err();

        assert_eq!(rejection.field_errors["city"], "city is required");
    }
}
