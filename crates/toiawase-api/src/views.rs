//! HTML views rendered with minijinja.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Names end in `.html`, so minijinja escapes every interpolated value.

use minijinja::{context, Environment};
use serde::Serialize;
use toiawase_export::format_timestamp;
use toiawase_persist::DBMessage;

use crate::forms::{FieldErrors, MessageForm};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("form.html", include_str!("../templates/form.html")),
    ("thanks.html", include_str!("../templates/thanks.html")),
    ("messages.html", include_str!("../templates/messages.html")),
    ("edit.html", include_str!("../templates/edit.html")),
];

/// A record as the templates see it, timestamp already formatted.
#[derive(Debug, Serialize)]
pub struct MessageView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub message: &'a str,
    pub created_at: String,
}

impl<'a> From<&'a DBMessage> for MessageView<'a> {
    fn from(message: &'a DBMessage) -> Self {
        Self {
            id: &message.id,
            name: &message.name,
            message: &message.message,
            created_at: format_timestamp(&message.created_at),
        }
    }
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn form(&self, form: &MessageForm, errors: &FieldErrors) -> Result<String, minijinja::Error> {
        self.env
            .get_template("form.html")?
            .render(context! { form => form, errors => errors })
    }

    pub fn thanks(&self) -> Result<String, minijinja::Error> {
        self.env.get_template("thanks.html")?.render(context! {})
    }

    pub fn message_list(&self, messages: &[DBMessage]) -> Result<String, minijinja::Error> {
        let messages: Vec<MessageView<'_>> = messages.iter().map(MessageView::from).collect();
        self.env
            .get_template("messages.html")?
            .render(context! { messages => messages })
    }

    pub fn edit(&self, message: &DBMessage, error: Option<&str>) -> Result<String, minijinja::Error> {
        self.env
            .get_template("edit.html")?
            .render(context! { message => MessageView::from(message), error => error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use toiawase_persist::NewMessage;

    fn stored(name: &str, body: &str) -> DBMessage {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        NewMessage::new(name, body).created_at(ts).into_message("abc123")
    }

    #[test]
    fn test_form_echoes_values_and_errors() {
        let views = Views::new().unwrap();
        let form = MessageForm {
            name: "Tanaka".to_string(),
            message: String::new(),
        };
        let errors = form.validate().unwrap_err();
        let html = views.form(&form, &errors).unwrap();

        assert!(html.contains("value=\"Tanaka\""));
        assert!(html.contains(crate::forms::MESSAGE_REQUIRED));
        assert!(!html.contains(crate::forms::NAME_REQUIRED));
    }

    #[test]
    fn test_list_escapes_html() {
        let views = Views::new().unwrap();
        let html = views
            .message_list(&[stored("<b>x</b>", "a & b")])
            .unwrap();

        assert!(html.contains("&lt;b&gt;x&lt;"));
        assert!(!html.contains("<b>x"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("09:00:00"));
        assert!(html.contains("/messages/edit/abc123"));
    }

    #[test]
    fn test_export_filter_sends_local_datetime() {
        let views = Views::new().unwrap();
        let html = views.message_list(&[]).unwrap();
        assert!(html.contains(r#"type="datetime-local" name="after""#));
        assert!(!html.contains(r#"type="date""#));
    }

    #[test]
    fn test_empty_list() {
        let views = Views::new().unwrap();
        let html = views.message_list(&[]).unwrap();
        assert!(html.contains("メッセージはまだありません"));
    }

    #[test]
    fn test_edit_shows_error() {
        let views = Views::new().unwrap();
        let html = views
            .edit(&stored("Tanaka", "Hello"), Some("メッセージを入力してください"))
            .unwrap();
        assert!(html.contains("Hello"));
        assert!(html.contains("class=\"error\""));
    }
}
