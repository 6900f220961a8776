use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub short: Option<String>,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub product_type: ProductType,
    pub active: bool,
    pub image: Option<String>, // storage key inside the products namespace
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Kind of activity a product offers. Also used as the catalog category.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ProductType {
    Excursion,
    Tour,
    Quest,
    Event,
    Masterclass,
    GastroTour,
    Exhibition,
    Tournament,
    Lecture,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown product type `{0}`")]
pub struct UnknownProductType(pub String);

impl ProductType {
    pub const ALL: [ProductType; 9] = [
        ProductType::Excursion,
        ProductType::Tour,
        ProductType::Quest,
        ProductType::Event,
        ProductType::Masterclass,
        ProductType::GastroTour,
        ProductType::Exhibition,
        ProductType::Tournament,
        ProductType::Lecture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Excursion => "excursion",
            ProductType::Tour => "tour",
            ProductType::Quest => "quest",
            ProductType::Event => "event",
            ProductType::Masterclass => "masterclass",
            ProductType::GastroTour => "gastroTour",
            ProductType::Exhibition => "exhibition",
            ProductType::Tournament => "tournament",
            ProductType::Lecture => "lecture",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = UnknownProductType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownProductType(s.to_string()))
    }
}

impl TryFrom<String> for ProductType {
    type Error = UnknownProductType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_are_camel_case() {
        assert_eq!("gastroTour".parse::<ProductType>().unwrap(), ProductType::GastroTour);
        assert!("gastrotour".parse::<ProductType>().is_err());
        assert_eq!(
            serde_json::to_string(&ProductType::GastroTour).unwrap(),
            "\"gastroTour\""
        );
    }
}
