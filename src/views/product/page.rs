use crate::models;
use crate::views;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Product detail page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub name: String,
    pub short: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: models::ProductType,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub summary: models::RatingSummary,
    pub comments: Vec<views::comment::Comment>,
    /// `None` for anonymous visitors
    pub favorite: Option<bool>,
    pub own_rating: Option<i16>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(
        product: models::Product,
        tags: Vec<models::Tag>,
        summary: models::RatingSummary,
        comments: Vec<models::Comment>,
    ) -> Self {
        Self {
            id: product.id,
            name: product.name,
            short: product.short,
            description: product.description,
            product_type: product.product_type,
            image: product.image,
            tags: tags.into_iter().map(|tag| tag.name).collect(),
            summary,
            comments: comments.into_iter().map(Into::into).collect(),
            favorite: None,
            own_rating: None,
            updated_at: product.updated_at,
        }
    }

    pub fn with_visitor(mut self, favorite: bool, own_rating: Option<&models::Rating>) -> Self {
        self.favorite = Some(favorite);
        self.own_rating = own_rating.map(|rating| rating.value);
        self
    }
}
