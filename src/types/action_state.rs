use serde::Serialize;
use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Field name -> human readable messages, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Moves the messages of `from` under `to`, after any already there.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(messages) = self.0.remove(from) {
            self.0.entry(to.to_string()).or_default().extend(messages);
        }
    }

    /// Folds `validator` errors in, preferring the custom message over the rule code.
    pub fn merge_validation(&mut self, errors: &ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            for e in errs.iter() {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                self.add(field.as_ref(), message);
            }
        }
    }
}

/// What a form is re-rendered with after a failed submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionState {
    pub errors: FieldErrors,
    pub message: Option<String>,
}

impl ActionState {
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            errors: FieldErrors::default(),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct EmailOnly {
        #[validate(email)]
        email: String,
    }

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = FieldErrors::default();
        errors.add("amount", "first");
        errors.add("amount", "second");
        assert_eq!(
            errors.get("amount"),
            Some(&["first".to_string(), "second".to_string()][..])
        );
        assert!(!errors.contains("status"));
    }

    #[test]
    fn rename_moves_messages_to_the_form_key() {
        let mut errors = FieldErrors::default();
        errors.add("customer_id", "Please select a customer.");
        errors.rename("customer_id", "customerId");
        errors.rename("missing", "elsewhere");
        assert_eq!(
            errors.get("customerId"),
            Some(&["Please select a customer.".to_string()][..])
        );
        assert!(!errors.contains("customer_id"));
        assert!(!errors.contains("elsewhere"));
    }

    #[test]
    fn validator_errors_fall_back_to_code() {
        let sample = EmailOnly {
            email: "nope".to_string(),
        };
        let mut errors = FieldErrors::default();
        errors.merge_validation(&sample.validate().unwrap_err());
        assert_eq!(errors.get("email"), Some(&["email".to_string()][..]));
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut errors = FieldErrors::default();
        errors.add("name", "Please add a customer.");
        let state = ActionState::invalid(errors, "Missing Fields.");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["errors"]["name"][0], "Please add a customer.");
        assert_eq!(json["message"], "Missing Fields.");
    }
}
