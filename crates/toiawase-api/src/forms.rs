//! Form payloads and the required-field rule shared by submit and edit.

use serde::{Deserialize, Serialize};
use toiawase_persist::NewMessage;

pub const NAME_REQUIRED: &str = "名前を入力してください";
pub const MESSAGE_REQUIRED: &str = "メッセージを入力してください";

/// URL-encoded `name` / `message` body. Missing fields deserialize as empty
/// so they fail validation instead of the extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MessageForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.message.is_none()
    }

    /// All messages joined for views with a single error slot.
    pub fn summary(&self) -> String {
        [self.name.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl MessageForm {
    /// Whitespace-only counts as empty; accepted values are kept verbatim.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.name = Some(NAME_REQUIRED.to_string());
        }
        if self.message.trim().is_empty() {
            errors.message = Some(MESSAGE_REQUIRED.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn into_new_message(self) -> NewMessage {
        NewMessage::new(self.name, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, message: &str) -> MessageForm {
        MessageForm {
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form("Tanaka", "Hello").validate().is_ok());
        assert!(form(" 田中 ", "こんにちは").validate().is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let errors = form("", "Hello").validate().unwrap_err();
        assert_eq!(errors.name.as_deref(), Some(NAME_REQUIRED));
        assert!(errors.message.is_none());

        let errors = form("Tanaka", "  \n").validate().unwrap_err();
        assert!(errors.name.is_none());
        assert_eq!(errors.message.as_deref(), Some(MESSAGE_REQUIRED));

        let errors = form("", "").validate().unwrap_err();
        assert_eq!(errors.summary(), format!("{NAME_REQUIRED} / {MESSAGE_REQUIRED}"));
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let new = form(" 田中 ", "hi ").into_new_message();
        assert_eq!(new.name, " 田中 ");
        assert_eq!(new.message, "hi ");
    }
}
