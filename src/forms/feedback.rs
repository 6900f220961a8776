use crate::forms::FormRejection;
use std::collections::BTreeMap;

const MAX_FIELDS: usize = 32;
const MAX_VALUE_LENGTH: usize = 4000;

/// Free-form feedback, the submitted fields are passed through as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub fields: BTreeMap<String, String>,
}

impl Feedback {
    pub fn parse(fields: BTreeMap<String, String>) -> Result<Feedback, FormRejection> {
        let fields: BTreeMap<String, String> = fields
            .into_iter()
            .map(|(name, value)| (name, value.trim().to_string()))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        if fields.is_empty() {
            return Err(FormRejection::form("Feedback is empty."));
        }
        if fields.len() > MAX_FIELDS {
            return Err(FormRejection::form("Too many fields."));
        }

        let mut rejection = FormRejection::default();
        for (name, value) in &fields {
            if value.chars().count() > MAX_VALUE_LENGTH {
                rejection.add_error(name, format!("{name} is too long"));
            }
        }

        rejection.finish(Some(Feedback { fields }))
    }

    /// Plain text rendering used for notifications.
    pub fn to_message(&self) -> String {
        let mut message = String::from("New feedback");
        for (name, value) in &self.fields {
            message.push_str(&format!("\n{}: {}", name, value));
        }
        message
    }
}
