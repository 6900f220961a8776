use crate::models;
use serde::Serialize;
use uuid::Uuid;

/// List entry of the catalog pages.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    pub short: Option<String>,
    #[serde(rename = "type")]
    pub product_type: models::ProductType,
    pub image: Option<String>,
    pub summary: models::RatingSummary,
}

impl From<models::RatedProduct> for Card {
    fn from(rated: models::RatedProduct) -> Self {
        let product = rated.product;
        Self {
            id: product.id,
            name: product.name,
            short: product.short,
            product_type: product.product_type,
            image: product.image,
            summary: rated.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn card_carries_the_aggregate() {
        let now = Utc::now();
        let rated = models::RatedProduct {
            product: models::Product {
                id: Uuid::new_v4(),
                name: "Quest".to_string(),
                short: None,
                description: Some("long text".to_string()),
                product_type: models::ProductType::Quest,
                active: true,
                image: None,
                created_at: now,
                updated_at: now,
            },
            summary: models::RatingSummary {
                ratings_sum: 10,
                ratings_count: 3,
            },
        };

        let json = serde_json::to_value(Card::from(rated)).unwrap();

        assert_eq!(json["type"], "quest");
        assert_eq!(json["summary"]["rating"], 3.33);
        assert!(json.get("description").is_none());
    }
}
