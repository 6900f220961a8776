use crate::forms::FormRejection;
use crate::models::RatingTarget;
use serde::Deserialize;
use serde_valid::Validate;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RateProductForm {
    pub product_id: Option<String>,
    pub rating: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatePlaceForm {
    pub place_id: Option<String>,
    pub rating: Option<String>,
}

/// A vote on a product or place. `0` withdraws the caller's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct Rate {
    pub target: RatingTarget,
    #[validate(minimum = 0)]
    #[validate(maximum = 5)]
    pub rating: i16,
}

fn parse_rating(rejection: &mut FormRejection, value: Option<&String>) -> Option<i16> {
    let value = rejection.required("rating", value)?;
    match value.parse::<i16>() {
        Ok(rating) => Some(rating),
        Err(_) => {
            rejection.add_error("rating", "rating must be an integer");
            None
        }
    }
}

impl RateProductForm {
    pub fn parse(&self) -> Result<Rate, FormRejection> {
        let mut rejection = FormRejection::default();
        let product_id = rejection.uuid("productId", self.product_id.as_ref());
        let rating = parse_rating(&mut rejection, self.rating.as_ref());

        let rate = product_id.zip(rating).map(|(id, rating)| Rate {
            target: RatingTarget::Product(id),
            rating,
        });
        let rate = rejection.validated(rate);
        rejection.finish(rate)
    }
}

impl RatePlaceForm {
    pub fn parse(&self) -> Result<Rate, FormRejection> {
        let mut rejection = FormRejection::default();
        let place_id = rejection.uuid("placeId", self.place_id.as_ref());
        let rating = parse_rating(&mut rejection, self.rating.as_ref());

        let rate = place_id.zip(rating).map(|(id, rating)| Rate {
            target: RatingTarget::Place(id),
            rating,
        });
        let rate = rejection.validated(rate);
        rejection.finish(rate)
    }
}
