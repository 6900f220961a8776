use crate::forms::FormRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteForm {
    pub product_id: Option<String>,
    pub intent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Favorite {
    pub product_id: Uuid,
    pub intent: Intent,
}

impl FavoriteForm {
    pub fn parse(&self) -> Result<Favorite, FormRejection> {
        let mut rejection = FormRejection::default();
        let product_id = rejection.uuid("productId", self.product_id.as_ref());
        let intent = match rejection.required("intent", self.intent.as_ref()).as_deref() {
            Some("add") => Some(Intent::Add),
            Some("remove") => Some(Intent::Remove),
            Some(_) => {
                rejection.add_error("intent", "intent must be `add` or `remove`");
                None
            }
            None => None,
        };

        let favorite = product_id
            .zip(intent)
            .map(|(product_id, intent)| Favorite { product_id, intent });
        rejection.finish(favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_intents() {
        let id = Uuid::new_v4();
        for (raw, intent) in [("add", Intent::Add), ("remove", Intent::Remove)] {
            let favorite = FavoriteForm {
                product_id: Some(id.to_string()),
                intent: Some(raw.to_string()),
            }
            .parse()
            .unwrap();
            assert_eq!(favorite, Favorite { product_id: id, intent });
        }
    }

    #[test]
    fn unknown_intent_is_rejected() {
        let rejection = FavoriteForm {
            product_id: Some(Uuid::new_v4().to_string()),
            intent: Some("toggle".to_string()),
        }
        .parse()
        .unwrap_err();

        assert!(rejection.field_errors.contains_key("intent"));
    }
}
