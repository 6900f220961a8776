use crate::forms::FormRejection;
use serde::Deserialize;
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    pub product_id: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewComment {
    pub product_id: Uuid,
    #[validate(min_length = 1)]
    #[validate(max_length = 2000)]
    pub text: String,
}

impl CommentForm {
    pub fn parse(&self) -> Result<NewComment, FormRejection> {
        let mut rejection = FormRejection::default();
        let product_id = rejection.uuid("productId", self.product_id.as_ref());
        let text = rejection.required("text", self.text.as_ref());

        let comment = product_id
            .zip(text)
            .map(|(product_id, text)| NewComment { product_id, text });
        let comment = rejection.validated(comment);
        rejection.finish(comment)
    }
}
