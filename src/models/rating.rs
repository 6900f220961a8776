use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Rating {
    pub id: Uuid,
    pub value: i16,
    pub user_id: Uuid,
    pub product_id: Option<Uuid>, // exactly one of product_id / place_id is set
    pub place_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    pub fn target(&self) -> Option<RatingTarget> {
        match (self.product_id, self.place_id) {
            (Some(id), None) => Some(RatingTarget::Product(id)),
            (None, Some(id)) => Some(RatingTarget::Place(id)),
            _ => None,
        }
    }
}

/// Catalog entity a vote is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum RatingTarget {
    Product(Uuid),
    Place(Uuid),
}

impl RatingTarget {
    pub fn id(&self) -> Uuid {
        match self {
            RatingTarget::Product(id) | RatingTarget::Place(id) => *id,
        }
    }
}

/// Aggregate computed on read from the rating rows of one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, sqlx::FromRow)]
pub struct RatingSummary {
    pub ratings_sum: i64,
    pub ratings_count: i64,
}

impl RatingSummary {
    /// `ratings_sum / ratings_count` rounded to 2 decimals, `None` without votes.
    pub fn average(&self) -> Option<f64> {
        if self.ratings_count == 0 {
            return None;
        }

        let average = self.ratings_sum as f64 / self.ratings_count as f64;
        Some((average * 100.0).round() / 100.0)
    }
}

impl Serialize for RatingSummary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("RatingSummary", 3)?;
        state.serialize_field("ratingsSum", &self.ratings_sum)?;
        state.serialize_field("ratingsCount", &self.ratings_count)?;
        state.serialize_field("rating", &self.average())?;
        state.end()
    }
}

/// A product row joined with its rating aggregate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RatedProduct {
    #[sqlx(flatten)]
    pub product: crate::models::Product,
    #[sqlx(flatten)]
    pub summary: RatingSummary,
}

/// A place row joined with its rating aggregate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RatedPlace {
    #[sqlx(flatten)]
    pub place: crate::models::Place,
    #[sqlx(flatten)]
    pub summary: RatingSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let summary = RatingSummary {
            ratings_sum: 14,
            ratings_count: 3,
        };
        assert_eq!(summary.average(), Some(4.67));

        let summary = RatingSummary {
            ratings_sum: 5,
            ratings_count: 1,
        };
        assert_eq!(summary.average(), Some(5.0));
    }

    #[test]
    fn no_votes_means_no_average() {
        assert_eq!(RatingSummary::default().average(), None);

        let json = serde_json::to_value(RatingSummary::default()).unwrap();
        assert_eq!(json["ratingsCount"], 0);
        assert!(json["rating"].is_null());
    }

    #[test]
    fn rating_row_resolves_its_target() {
        let id = Uuid::new_v4();
        let rating = Rating {
            id: Uuid::new_v4(),
            value: 3,
            user_id: Uuid::new_v4(),
            product_id: None,
            place_id: Some(id),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(rating.target(), Some(RatingTarget::Place(id)));
    }
}
