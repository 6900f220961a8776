use crate::forms::FormRejection;
use crate::models::ProductType;
use serde::Deserialize;
use serde_valid::Validate;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: Option<String>,
    pub short: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub active: Option<String>,
    /// comma separated tag names
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ProductInput {
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(max_length = 512)]
    pub short: Option<String>,
    #[validate(max_length = 20000)]
    pub description: Option<String>,
    pub product_type: ProductType,
    pub active: bool,
    #[validate(max_items = 20)]
    pub tags: Vec<String>,
}

/// Checkbox style flag: absent means unchecked.
pub(crate) fn parse_flag(rejection: &mut FormRejection, field: &str, value: Option<&String>) -> bool {
    match rejection.optional(field, value).as_deref() {
        None | Some("false") | Some("off") | Some("0") => false,
        Some("true") | Some("on") | Some("1") => true,
        Some(_) => {
            rejection.add_error(field, format!("{field} must be a boolean"));
            false
        }
    }
}

fn parse_tags(value: Option<String>) -> Vec<String> {
    let mut tags: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

impl ProductForm {
    pub fn parse(&self) -> Result<ProductInput, FormRejection> {
        let mut rejection = FormRejection::default();
        let name = rejection.required("name", self.name.as_ref());
        let short = rejection.optional("short", self.short.as_ref());
        let description = rejection.optional("description", self.description.as_ref());
        let product_type = match rejection.required("type", self.product_type.as_ref()) {
            Some(value) => match value.parse::<ProductType>() {
                Ok(kind) => Some(kind),
                Err(err) => {
                    rejection.add_error("type", err.to_string());
                    None
                }
            },
            None => None,
        };
        let active = parse_flag(&mut rejection, "active", self.active.as_ref());
        let tags = parse_tags(rejection.optional("tags", self.tags.as_ref()));

        let input = name.zip(product_type).map(|(name, product_type)| ProductInput {
            name,
            short,
            description,
            product_type,
            active,
            tags,
        });
        let input = rejection.validated(input);
        rejection.finish(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_admin_form() {
        let input = ProductForm {
            name: Some("Night walk".to_string()),
            short: Some("".to_string()),
            description: None,
            product_type: Some("gastroTour".to_string()),
            active: Some("on".to_string()),
            tags: Some("Food, night ,food,,".to_string()),
        }
        .parse()
        .unwrap();

        assert_eq!(input.product_type, ProductType::GastroTour);
        assert!(input.active);
        assert_eq!(input.short, None);
        assert_eq!(input.tags, vec!["food".to_string(), "night".to_string()]);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let rejection = ProductForm {
            name: Some("Walk".to_string()),
            product_type: Some("cruise".to_string()),
            ..Default::default()
        }
        .parse()
        .unwrap_err();

        assert!(rejection.field_errors.contains_key("type"));
    }
}
